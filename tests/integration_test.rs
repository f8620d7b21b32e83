//! Integration tests for the metrics engine.
//!
//! Tests cover:
//! - Reference scenarios for R resolution and aggregation
//! - Raw journal records through normalization into metrics
//! - Strategy comparison, session breakdown and distribution on one journal
//! - Loading through the `TradeSource` port with a mock source

mod common;

use approx::assert_relative_eq;
use common::*;
use serde_json::json;
use tradejournal::cli::{self, Settings};
use tradejournal::domain::breakdown::{BreakdownKey, breakdown, compare_strategies};
use tradejournal::domain::distribution::r_distribution;
use tradejournal::domain::error::JournalError;
use tradejournal::domain::journal::{Journal, TradeFilter};
use tradejournal::domain::metrics::{MetricsSummary, ProfitSummary, compute_metrics};
use tradejournal::domain::r_value::resolve_r;
use tradejournal::domain::strategy::{BreakevenStrategy, MetricsOptions, RTargetMode};
use tradejournal::domain::trade::{Session, TradeRecord};
use tradejournal::ports::report_port::ReportFormat;
use tradejournal::ports::trade_port::SourceFormat;

fn sample_journal() -> Journal {
    Journal::from_raw(&sample_records()).journal
}

fn no_be() -> MetricsOptions {
    MetricsOptions::new(1.0, BreakevenStrategy::NoBe)
}

mod reference_scenarios {
    use super::*;

    #[test]
    fn win_and_loss_under_no_be() {
        let records = vec![
            json!({"date": "2024-01-02", "mfeNone": 2, "rTarget": 1}),
            json!({"date": "2024-01-03", "mfeNone": -0.5, "rTarget": 1}),
        ];
        let journal = Journal::from_raw(&records).journal;
        let trades = journal.trades();

        let rs: Vec<f64> = trades
            .iter()
            .filter_map(|t| resolve_r(t, BreakevenStrategy::NoBe, t.r_target))
            .map(|r| r.r)
            .collect();
        assert_eq!(rs, vec![1.0, -1.0]);

        let m = compute_metrics(trades, &no_be());
        assert_eq!(m.win_rate, 50.0);
        assert_eq!(m.expectancy, 0.0);
    }

    #[test]
    fn breakeven_hit_but_target_missed() {
        let records = vec![json!({"date": "2024-01-02", "be1Hit": true, "mfe1": 0.4, "rTarget": 1})];
        let journal = Journal::from_raw(&records).journal;
        let r = resolve_r(&journal.trades()[0], BreakevenStrategy::Be1R, 1.0).unwrap();
        assert_eq!(r.r, 0.0);
    }

    #[test]
    fn trade_without_mfe_is_excluded_everywhere() {
        let records = vec![json!({"date": "2024-01-02", "be1Hit": true, "be2Hit": true})];
        let journal = Journal::from_raw(&records).journal;
        for s in BreakevenStrategy::ALL {
            let m = compute_metrics(journal.trades(), &MetricsOptions::new(1.0, s));
            assert_eq!(m.total_trades, 0);
            assert_eq!(m.active_trades, 1);
        }
    }

    #[test]
    fn profit_factor_edges() {
        assert_eq!(
            MetricsSummary::summarize_values(&[-1.0, -1.0, -1.0]).profit_factor,
            0.0
        );
        assert!(
            MetricsSummary::summarize_values(&[1.0, 1.0, 1.0])
                .profit_factor
                .is_infinite()
        );
    }

    #[test]
    fn repeated_computation_is_bit_identical() {
        let journal = sample_journal();
        let options = MetricsOptions::new(1.5, BreakevenStrategy::Be1R);
        let a = compute_metrics(journal.trades(), &options);
        let b = compute_metrics(journal.trades(), &options);
        assert_eq!(a, b);
        assert_eq!(a.sharpe_ratio.to_bits(), b.sharpe_ratio.to_bits());
    }
}

mod journal_metrics {
    use super::*;

    #[test]
    fn normalization_accepts_mixed_spellings() {
        let loaded = Journal::from_raw(&sample_records());
        assert_eq!(loaded.journal.len(), 9);
        assert_eq!(loaded.rejected.len(), 1);
        assert_eq!(loaded.journal.active_count(), 1);
    }

    #[test]
    fn no_be_summary() {
        let m = compute_metrics(sample_journal().trades(), &no_be());
        assert_eq!(m.total_trades, 8);
        assert_eq!(m.active_trades, 1);
        assert_eq!(m.win_rate, 62.5);
        assert_eq!(m.expectancy, 0.25);
        assert_relative_eq!(m.total_r, 2.0);
        assert_relative_eq!(m.max_drawdown, 2.0);
        assert_relative_eq!(m.profit_factor, 5.0 / 3.0);
        assert_relative_eq!(m.sharpe_ratio, 0.25 / 0.9375_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(m.max_consecutive_wins, 2);
        assert_eq!(m.max_consecutive_losses, 2);
    }

    #[test]
    fn be_1r_summary_counts_scratches_as_non_losses() {
        let options = MetricsOptions::new(1.0, BreakevenStrategy::Be1R);
        let m = compute_metrics(sample_journal().trades(), &options);
        assert_eq!(m.total_trades, 8);
        assert_eq!(m.trades_breakeven, 1);
        assert_eq!(m.win_rate, 62.5);
        assert_eq!(m.expectancy, 0.13);
    }

    #[test]
    fn per_trade_targets() {
        let records = vec![
            json!({"date": "2024-01-02", "mfeNone": 2.5, "rTarget": 2}),
            json!({"date": "2024-01-03", "mfeNone": 2.5, "rTarget": 3}),
        ];
        let journal = Journal::from_raw(&records).journal;
        let options = MetricsOptions {
            r_target: RTargetMode::PerTrade,
            breakeven_strategy: BreakevenStrategy::NoBe,
        };
        let m = compute_metrics(journal.trades(), &options);
        assert_relative_eq!(m.total_r, 1.0);
        assert_eq!(m.trades_won, 1);
        assert_eq!(m.trades_lost, 1);
    }

    #[test]
    fn profit_summary() {
        let p = ProfitSummary::compute(sample_journal().trades());
        assert_eq!(p.total_trades, 8);
        assert_relative_eq!(p.net_profit, 330.0);
        assert_eq!(p.win_rate, 62.5);
        assert_relative_eq!(p.profit_factor, 3.2);
        assert_relative_eq!(p.max_drawdown, 100.0);
        assert_relative_eq!(p.largest_win, 150.0);
        assert_relative_eq!(p.largest_loss, 50.0);
    }
}

mod breakdowns {
    use super::*;

    #[test]
    fn strategy_comparison_recommends_no_be() {
        let b = compare_strategies(sample_journal().trades(), RTargetMode::Fixed(1.0), 3);
        let expectancies: Vec<f64> = b.partitions.iter().map(|p| p.summary.expectancy).collect();
        assert_eq!(expectancies, vec![0.25, 0.13, -1.0]);
        assert_eq!(b.recommended_partition().unwrap().label, "NO_BE");
    }

    #[test]
    fn session_breakdown_recommends_new_york_am() {
        let b = breakdown(sample_journal().trades(), &no_be(), BreakdownKey::Session, 3);
        let labels: Vec<&str> = b.partitions.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["LONDON", "NEW_YORK_AM", "ASIA"]);
        assert_eq!(b.partitions[0].summary.expectancy, 0.33);
        assert_eq!(b.partitions[1].summary.expectancy, 0.5);
        assert_eq!(b.recommended_partition().unwrap().label, "NEW_YORK_AM");
    }

    #[test]
    fn session_breakdown_without_enough_samples() {
        let b = breakdown(sample_journal().trades(), &no_be(), BreakdownKey::Session, 5);
        assert_eq!(b.recommended, None);
    }

    #[test]
    fn distribution_over_mfe_none() {
        let d = r_distribution(sample_journal().trades(), BreakevenStrategy::NoBe);
        let counts: Vec<usize> = d.buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 2, 3, 1, 1]);
        assert_eq!(d.total, 8);
    }

    #[test]
    fn filter_then_summarize() {
        let filter = TradeFilter {
            session: Some(Session::London),
            ..Default::default()
        };
        let london = sample_journal().filter(&filter);
        assert_eq!(london.len(), 4);
        let m = compute_metrics(london.trades(), &no_be());
        assert_eq!(m.total_trades, 3);
        assert_eq!(m.active_trades, 1);
    }

    #[test]
    fn hand_built_trades() {
        let trades: Vec<TradeRecord> = vec![
            make_trade(1, Session::Asia, 2.0),
            make_trade(2, Session::Asia, 2.0),
            make_trade(3, Session::Asia, -1.0),
        ];
        let b = breakdown(&trades, &no_be(), BreakdownKey::Session, 3);
        assert_eq!(b.recommended, Some(0));
    }
}

mod trade_source_port {
    use super::*;

    fn settings() -> Settings {
        Settings {
            source: "mock".into(),
            source_format: SourceFormat::Json,
            options: no_be(),
            min_sample: 3,
            filter: TradeFilter::default(),
            report_format: ReportFormat::Text,
            output: None,
        }
    }

    #[test]
    fn load_journal_reports_counts() {
        let source = MockTradeSource::new(sample_records());
        let (journal, ctx) = cli::load_journal(&source, &settings()).unwrap();
        assert_eq!(source.loads.get(), 1);
        assert_eq!(journal.len(), 9);
        assert_eq!(ctx.loaded, 10);
        assert_eq!(ctx.rejected, 1);
        assert_eq!(ctx.analysed, 9);
        assert_eq!(ctx.source, "mock");
    }

    #[test]
    fn load_journal_applies_filter() {
        let mut s = settings();
        s.filter.from = Some(date(2024, 3, 8));
        let source = MockTradeSource::new(sample_records());
        let (journal, ctx) = cli::load_journal(&source, &s).unwrap();
        assert_eq!(journal.len(), 4);
        assert_eq!(ctx.analysed, 4);
    }

    #[test]
    fn empty_after_filter_is_no_trades() {
        let mut s = settings();
        s.filter.from = Some(date(2030, 1, 1));
        let source = MockTradeSource::new(sample_records());
        let err = cli::load_journal(&source, &s).unwrap_err();
        assert!(matches!(err, JournalError::NoTrades { loaded: 10, rejected: 1 }));
        assert_eq!(err.exit_status(), 4);
    }

    #[test]
    fn source_failure_propagates() {
        let source = MockTradeSource::failing("connection refused");
        let err = cli::load_journal(&source, &settings()).unwrap_err();
        assert!(matches!(err, JournalError::TradeSource { .. }));
        assert_eq!(err.exit_status(), 3);
    }
}
