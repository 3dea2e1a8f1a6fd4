use crate::snapshot::BreadthCounts;

/// Counts advancing, declining, and unchanged tickers from price pairs.
///
/// Each item is a ticker's (previous open, latest trade). A ticker with
/// either price missing is skipped entirely rather than counted as
/// unchanged, so thin data cannot inflate the unchanged bucket.
pub fn tally<I>(prices: I) -> BreadthCounts
where
    I: IntoIterator<Item = (Option<f64>, Option<f64>)>,
{
    let mut counts = BreadthCounts::default();
    for (prev, last) in prices {
        let (Some(prev), Some(last)) = (prev, last) else {
            continue;
        };
        if prev < last {
            counts.advancing += 1;
        } else if prev > last {
            counts.declining += 1;
        } else {
            counts.unchanged += 1;
        }
    }
    counts
}
