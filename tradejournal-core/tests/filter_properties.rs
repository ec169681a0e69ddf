//! Property tests for trade filters.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use tradejournal_core::{DateRange, NewsEvent, NewsFilter, NewsImpact, ReferenceClock, Trade};

fn clock() -> ReferenceClock {
    ReferenceClock::fixed(
        NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    )
}

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn arb_impact() -> impl Strategy<Value = NewsImpact> {
    prop_oneof![
        Just(NewsImpact::Red),
        Just(NewsImpact::Orange),
        Just(NewsImpact::Yellow),
        Just(NewsImpact::Grey),
    ]
}

fn arb_trades() -> impl Strategy<Value = Vec<Trade>> {
    prop::collection::vec(
        (0i64..365, -500.0..500.0_f64, prop::collection::vec(arb_impact(), 0..3)),
        0..50,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (offset, pnl, impacts))| {
                let date = base() + Duration::days(offset);
                let day = date.format("%Y-%m-%d").to_string();
                let mut t = Trade::new(format!("t{i}"), day, "ES", pnl);
                t.news = impacts
                    .into_iter()
                    .map(|impact| NewsEvent {
                        impact,
                        name: String::new(),
                        time: String::new(),
                    })
                    .collect();
                t
            })
            .collect()
    })
}

proptest! {
    /// Splitting at any day partitions the trades with no loss or overlap.
    #[test]
    fn adjacent_ranges_partition_trades(trades in arb_trades(), split in 0i64..365) {
        let clock = clock();
        let cut = base() + Duration::days(split);
        let before = DateRange::between(None, cut.pred_opt()).apply(&trades, &clock);
        let after = DateRange::between(Some(cut), None).apply(&trades, &clock);
        prop_assert_eq!(before.len() + after.len(), trades.len());
        prop_assert!(before.iter().all(|t| !after.iter().any(|u| u.id == t.id)));
    }

    /// Filtering keeps the caller's relative order.
    #[test]
    fn range_filter_preserves_order(trades in arb_trades(), lo in 0i64..180, span in 0i64..180) {
        let start = base() + Duration::days(lo);
        let range = DateRange::between(Some(start), Some(start + Duration::days(span)));
        let kept = range.apply(&trades, &clock());
        let positions: Vec<usize> = kept
            .iter()
            .map(|k| trades.iter().position(|t| t.id == k.id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    /// Every trade matches either NoNews or at least one of its own impacts.
    #[test]
    fn full_news_selection_keeps_everything(trades in arb_trades()) {
        let filter = NewsFilter::new([
            NewsImpact::Red,
            NewsImpact::Orange,
            NewsImpact::Yellow,
            NewsImpact::Grey,
            NewsImpact::NoNews,
        ]);
        prop_assert_eq!(filter.apply(&trades).len(), trades.len());
    }

    /// A single-impact filter keeps exactly the trades carrying that impact.
    #[test]
    fn single_impact_selection(trades in arb_trades(), impact in arb_impact()) {
        let kept = NewsFilter::new([impact]).apply(&trades);
        let expected = trades
            .iter()
            .filter(|t| t.news.iter().any(|n| n.impact == impact))
            .count();
        prop_assert_eq!(kept.len(), expected);
    }
}
