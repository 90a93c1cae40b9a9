use super::Reflection;
use rfscan_common::Real;

/// Discards every reflection after the first whose peak amplitude is below
/// `rejection_ratio * max_amplitude`. The first reflection is the reference
/// for all later ones and is always kept.
pub(crate) fn retain_significant(
    mut reflections: Vec<Reflection>,
    max_amplitude: Real,
    rejection_ratio: Real,
) -> Vec<Reflection> {
    if reflections.len() > 1 {
        let rejection_threshold = max_amplitude * rejection_ratio;
        let mut index = 0;
        reflections.retain(|reflection| {
            index += 1;
            index == 1 || reflection.peak_amplitude >= rejection_threshold
        });
    }
    reflections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_amplitudes(amplitudes: &[Real]) -> Vec<Reflection> {
        amplitudes
            .iter()
            .enumerate()
            .map(|(i, &peak_amplitude)| Reflection {
                crossing: 100 * i,
                leading_edge: 100 * i,
                peak: 100 * i,
                peak_amplitude,
            })
            .collect()
    }

    fn amplitudes(reflections: &[Reflection]) -> Vec<Real> {
        reflections.iter().map(|r| r.peak_amplitude).collect()
    }

    #[test]
    fn empty() {
        assert!(retain_significant(Vec::new(), 1.0, 0.15).is_empty());
    }

    #[test]
    fn single_is_kept() {
        let kept = retain_significant(with_amplitudes(&[0.01]), 1.0, 0.15);
        assert_eq!(amplitudes(&kept), vec![0.01]);
    }

    #[test]
    fn weak_primary_is_kept() {
        let kept = retain_significant(with_amplitudes(&[0.1, 1.0, 0.1, 0.5]), 1.0, 0.15);
        assert_eq!(amplitudes(&kept), vec![0.1, 1.0, 0.5]);
    }

    #[test]
    fn boundary_is_inclusive() {
        let kept = retain_significant(with_amplitudes(&[1.0, 0.25, 0.2499]), 1.0, 0.25);
        assert_eq!(amplitudes(&kept), vec![1.0, 0.25]);
    }

    #[test]
    fn order_is_preserved() {
        let kept = retain_significant(with_amplitudes(&[1.0, 0.9, 0.05, 0.8]), 1.0, 0.15);
        let edges: Vec<_> = kept.iter().map(|r| r.leading_edge).collect();
        assert_eq!(edges, vec![0, 100, 300]);
    }
}
