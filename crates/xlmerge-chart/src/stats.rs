//! Statistics behind the chart recipes.

use std::collections::HashMap;

use xlmerge_model::{CellValue, NumericColumn};

/// One histogram bin, `[start, end)` except the last which includes `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Pearson correlation over the rows where both values are present.
///
/// Returns `None` with fewer than two complete pairs or when either side is
/// constant.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Pairwise correlation matrix, row-major in column order.
pub fn correlation_matrix(columns: &[NumericColumn]) -> Vec<Vec<Option<f64>>> {
    columns
        .iter()
        .map(|a| {
            columns
                .iter()
                .map(|b| pearson(&a.values, &b.values))
                .collect()
        })
        .collect()
}

/// Splits the present values into `bins` equal-width bins.
///
/// A constant column gets the range `value ± 0.5`.
pub fn histogram(values: &[Option<f64>], bins: usize) -> Vec<Bin> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() || bins == 0 {
        return Vec::new();
    }
    let mut lo = present.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in present {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| Bin {
            start: lo + width * idx as f64,
            end: lo + width * (idx + 1) as f64,
            count,
        })
        .collect()
}

/// Frequency of each distinct value, most frequent first.
///
/// Missing cells are ignored; ties keep first-appearance order.
pub fn value_counts(cells: &[CellValue]) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for cell in cells.iter().filter(|cell| !cell.is_missing()) {
        let label = cell.to_string();
        match index.get(&label) {
            Some(&pos) => order[pos].1 += 1,
            None => {
                index.insert(label.clone(), order.len());
                order.push((label, 1));
            }
        }
    }
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_pearson_extremes() {
        let x = some(&[1.0, 2.0, 3.0, 4.0]);
        let up = some(&[2.0, 4.0, 6.0, 8.0]);
        let down = some(&[8.0, 6.0, 4.0, 2.0]);
        assert!((pearson(&x, &up).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &down).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_pairwise_complete() {
        let x = vec![Some(1.0), None, Some(2.0), Some(3.0)];
        let y = vec![Some(1.0), Some(100.0), Some(2.0), Some(3.0)];
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_undefined() {
        assert_eq!(pearson(&some(&[1.0, 1.0]), &some(&[1.0, 2.0])), None);
        assert_eq!(pearson(&some(&[1.0]), &some(&[1.0])), None);
    }

    #[test]
    fn test_histogram_bins() {
        let values = some(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let bins = histogram(&values, 10);
        assert_eq!(bins.len(), 10);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 11);
        // The maximum lands in the last, closed bin.
        assert_eq!(bins[9].count, 2);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[9].end, 10.0);
    }

    #[test]
    fn test_histogram_constant() {
        let bins = histogram(&[Some(3.0), Some(3.0), None], 10);
        assert_eq!(bins[0].start, 2.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
        assert!(histogram(&[None], 10).is_empty());
    }

    #[test]
    fn test_value_counts_order() {
        let cells = [
            CellValue::text("b"),
            CellValue::text("a"),
            CellValue::Empty,
            CellValue::text("a"),
            CellValue::text("c"),
            CellValue::text("b"),
            CellValue::text("d"),
        ];
        let counts = value_counts(&cells);
        assert_eq!(
            counts,
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1),
                ("d".to_string(), 1),
            ]
        );
    }
}
