/// Normalized 1D Gaussian kernel.
///
/// Conventions:
/// - [`GaussianKernel1D::from_sigma`]: `radius = round(3*sigma)`, minimum 1.
/// - [`GaussianKernel1D::for_window`]: fixed `ksize` taps with
///   `sigma = 0.3*((ksize-1)*0.5 - 1) + 0.8`, except `ksize <= 7`, which
///   uses the tables `[1 2 1]/4`, `[1 4 6 4 1]/16`, `[1 3.5 7 9 7 3.5 1]/32`.
/// - `weights` has `2*radius + 1` taps and `sum(weights) ~= 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel1D {
    pub sigma: f32,
    pub radius: usize,
    pub weights: Vec<f32>,
}

impl GaussianKernel1D {
    pub fn from_sigma(sigma: f32) -> Self {
        assert!(
            sigma.is_finite() && sigma > 0.0,
            "sigma must be > 0 and finite"
        );

        let radius = ((3.0 * sigma).round() as usize).max(1);
        Self::build(sigma, radius)
    }

    /// Kernel for an odd `ksize`-tap neighborhood window.
    ///
    /// Windows of up to 7 taps use fixed binomial-like tables; `sigma` still
    /// reports the formula value for them.
    pub fn for_window(ksize: usize) -> Self {
        assert!(ksize % 2 == 1, "window size must be odd");

        let sigma = 0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8;
        let fixed: Option<&[f32]> = match ksize {
            1 => Some(&[1.0]),
            3 => Some(&[0.25, 0.5, 0.25]),
            5 => Some(&[0.0625, 0.25, 0.375, 0.25, 0.0625]),
            7 => Some(&[
                0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
            ]),
            _ => None,
        };

        match fixed {
            Some(weights) => Self {
                sigma,
                radius: ksize / 2,
                weights: weights.to_vec(),
            },
            None => Self::build(sigma, ksize / 2),
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    fn build(sigma: f32, radius: usize) -> Self {
        let len = 2 * radius + 1;
        let sigma2 = sigma * sigma;

        let mut weights = vec![0.0f32; len];
        for (i, wi) in weights.iter_mut().enumerate() {
            let x = i as f32 - radius as f32;
            *wi = (-(x * x) / (2.0 * sigma2)).exp();
        }

        let sum: f32 = weights.iter().sum();
        for wi in &mut weights {
            *wi /= sum;
        }

        Self {
            sigma,
            radius,
            weights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GaussianKernel1D;

    #[test]
    fn from_sigma_is_normalized_and_symmetric() {
        let k = GaussianKernel1D::from_sigma(1.2);
        assert_eq!(k.radius, 4);
        assert_eq!(k.len(), 9);

        let sum: f32 = k.weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);

        for i in 1..=k.radius {
            let a = k.weights[k.radius + i];
            let b = k.weights[k.radius - i];
            assert!((a - b).abs() < 1e-7);
            assert!(a < k.weights[k.radius + i - 1]);
        }
    }

    #[test]
    fn small_sigma_keeps_radius_one() {
        let k = GaussianKernel1D::from_sigma(0.1);
        assert_eq!(k.radius, 1);
        assert_eq!(k.len(), 3);
    }

    #[test]
    fn window_kernel_has_window_taps() {
        let k = GaussianKernel1D::for_window(11);
        assert_eq!(k.len(), 11);
        assert!((k.sigma - 2.0).abs() < 1e-6);

        let k9 = GaussianKernel1D::for_window(9);
        assert!((k9.sigma - 1.7).abs() < 1e-6);
        let sum: f32 = k9.weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn small_windows_use_fixed_tables() {
        let k3 = GaussianKernel1D::for_window(3);
        assert_eq!(k3.radius, 1);
        assert_eq!(k3.weights, vec![0.25, 0.5, 0.25]);

        let k5 = GaussianKernel1D::for_window(5);
        let expected: Vec<f32> = [1.0, 4.0, 6.0, 4.0, 1.0].iter().map(|v| v / 16.0).collect();
        assert_eq!(k5.weights, expected);

        let k7 = GaussianKernel1D::for_window(7);
        let expected: Vec<f32> = [1.0, 3.5, 7.0, 9.0, 7.0, 3.5, 1.0]
            .iter()
            .map(|v| v / 32.0)
            .collect();
        assert_eq!(k7.weights, expected);

        for k in [k3, k5, k7] {
            let sum: f32 = k.weights.iter().sum();
            assert_eq!(sum, 1.0);
        }
    }
}
