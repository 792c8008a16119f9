use crate::cluster::Metric;
use crate::error::{Error, Result};
use crate::{Labels, Matrix};
use std::collections::BTreeMap;

/// Mean silhouette coefficient over all samples.
///
/// Every distinct label, the noise label included, is treated as a group.
/// A sample alone in its group scores 0. Defined only when there are at
/// least 2 and at most `n_samples - 1` distinct labels.
pub fn silhouette_score(x: &Matrix, labels: &Labels, metric: Metric) -> Result<f64> {
    let scores = silhouette_samples(x, labels, metric)?;
    Ok(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Silhouette coefficient of each sample, see [`silhouette_score`].
pub fn silhouette_samples(x: &Matrix, labels: &Labels, metric: Metric) -> Result<Vec<f64>> {
    let n_samples = x.nrows();
    if labels.len() != n_samples {
        return Err(Error::invalid(
            "labels",
            format!("expected {} labels, got {}", n_samples, labels.len()),
        ));
    }

    let mut groups: BTreeMap<i32, usize> = BTreeMap::new();
    for &label in labels.iter() {
        *groups.entry(label).or_insert(0) += 1;
    }
    let n_labels = groups.len();
    if n_labels < 2 || n_labels + 1 > n_samples {
        return Err(Error::invalid(
            "labels",
            format!(
                "silhouette needs 2 <= n_labels <= n_samples - 1, got {} labels for {} samples",
                n_labels, n_samples
            ),
        ));
    }

    let slot: BTreeMap<i32, usize> = groups.keys().enumerate().map(|(i, &l)| (l, i)).collect();
    let sizes: Vec<usize> = groups.values().copied().collect();
    let mut scores = Vec::with_capacity(n_samples);
    let mut totals = vec![0.0; n_labels];

    for i in 0..n_samples {
        totals.iter_mut().for_each(|t| *t = 0.0);
        for j in 0..n_samples {
            if i != j {
                totals[slot[&labels[j]]] += metric.distance(&x.row(i), &x.row(j));
            }
        }

        let own = slot[&labels[i]];
        if sizes[own] == 1 {
            scores.push(0.0);
            continue;
        }

        let a = totals[own] / (sizes[own] - 1) as f64;
        let b = (0..n_labels)
            .filter(|&k| k != own)
            .map(|k| totals[k] / sizes[k] as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = a.max(b);
        scores.push(if denom > 0.0 { (b - a) / denom } else { 0.0 });
    }

    Ok(scores)
}
