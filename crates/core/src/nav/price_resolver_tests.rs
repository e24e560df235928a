#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use chrono::{TimeDelta, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::diagnostics::{CollectingDiagnosticSink, Diagnostic, DiagnosticKind};
    use crate::nav::price_resolver::{
        fetch_window, outcome_from_quotes, PriceResolver, ResolverOptions, MAX_LOOKBACK_DAYS,
    };
    use crate::nav::test_support::{
        daily_quotes, quote_on, resolver_with, MockProvider, MockResponse,
    };
    use crate::nav::TickerOutcome;

    fn tickers(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    // --- outcome_from_quotes ---

    #[test]
    fn test_empty_series_is_no_data() {
        assert_eq!(outcome_from_quotes(Vec::new()), TickerOutcome::NoData);
    }

    #[test]
    fn test_single_close_is_insufficient() {
        let outcome = outcome_from_quotes(daily_quotes(&[dec!(100)]));
        assert_eq!(
            outcome,
            TickerOutcome::InsufficientHistory { valid_closes: 1 }
        );
    }

    #[test]
    fn test_only_last_two_valid_closes_matter() {
        let outcome = outcome_from_quotes(daily_quotes(&[
            dec!(50),
            dec!(80),
            dec!(100),
            dec!(102),
        ]));

        let observation = outcome.observation().unwrap();
        assert_eq!(observation.previous_close, dec!(100));
        assert_eq!(observation.current_close, dec!(102));
        assert_eq!(outcome.percent_change(), dec!(2));
    }

    #[test]
    fn test_unordered_series_is_sorted_chronologically() {
        let quotes = vec![quote_on(2, dec!(99)), quote_on(0, dec!(10)), quote_on(1, dec!(110))];
        let outcome = outcome_from_quotes(quotes);

        // [10, 110, 99] chronologically -> previous 110, current 99
        let observation = outcome.observation().unwrap();
        assert_eq!(observation.previous_close, dec!(110));
        assert_eq!(observation.current_close, dec!(99));
        assert_eq!(observation.previous_at, quote_on(1, dec!(110)).timestamp);
        assert_eq!(outcome.percent_change(), dec!(-10));
    }

    #[test]
    fn test_non_positive_closes_are_skipped() {
        let outcome = outcome_from_quotes(daily_quotes(&[
            dec!(200),
            dec!(0),
            dec!(198),
            dec!(-1),
        ]));
        assert_eq!(outcome.percent_change(), dec!(-1));

        let outcome = outcome_from_quotes(daily_quotes(&[dec!(0), dec!(15)]));
        assert_eq!(
            outcome,
            TickerOutcome::InsufficientHistory { valid_closes: 1 }
        );
    }

    #[test]
    fn test_out_of_range_change_is_reported_not_priced() {
        let outcome = outcome_from_quotes(vec![
            quote_on(0, dec!(0.0000000000000000000001)),
            quote_on(1, Decimal::MAX),
        ]);

        assert!(matches!(outcome, TickerOutcome::Overflow { .. }));
        assert_eq!(outcome.percent_change(), Decimal::ZERO);
        assert!(matches!(
            outcome.diagnostic("A").map(|d| d.kind),
            Some(DiagnosticKind::Overflow { .. })
        ));
    }

    // --- fetch_window ---

    #[test]
    fn test_window_spans_lookback_plus_today() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let (start, end) = fetch_window(now, 7).unwrap();

        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 8, 10, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 16, 10, 0, 0).unwrap());
        assert_eq!(end - start, TimeDelta::days(8));
    }

    #[test]
    fn test_window_rejects_unusable_lookback() {
        let now = Utc::now();
        assert!(fetch_window(now, 0).is_none());
        assert!(fetch_window(now, -3).is_none());
        assert!(fetch_window(now, 200_000_000).is_none());
        assert!(fetch_window(now, i64::MAX).is_none());
        assert!(fetch_window(now, MAX_LOOKBACK_DAYS).is_some());
    }

    // --- resolve ---

    #[tokio::test]
    async fn test_default_request_window_covers_lookback() {
        let provider = MockProvider::new().with_closes("A", &[dec!(1), dec!(2)]);
        let sink = CollectingDiagnosticSink::new();
        let before = Utc::now();

        resolver_with(&provider, &sink)
            .resolve(&tickers(&["A"]))
            .await;

        let windows = provider.windows();
        assert_eq!(windows.len(), 1);
        let (start, end) = windows[0];
        assert_eq!(end - start, TimeDelta::days(8));
        assert!(end > before);
        assert!(start <= before - TimeDelta::days(7) + TimeDelta::seconds(5));
    }

    #[tokio::test]
    async fn test_custom_lookback_reaches_the_provider() {
        let provider = MockProvider::new()
            .with_closes("A", &[dec!(1), dec!(2)])
            .with_closes("B", &[dec!(1), dec!(2)]);
        let sink = CollectingDiagnosticSink::new();
        let resolver = PriceResolver::new(Arc::new(provider.clone()), Arc::new(sink.clone()))
            .with_options(ResolverOptions {
                lookback_days: 3,
                ..ResolverOptions::default()
            });
        let before = Utc::now();

        resolver.resolve(&tickers(&["A", "B"])).await;

        let windows = provider.windows();
        assert_eq!(windows.len(), 2);
        for (start, end) in windows {
            assert_eq!(end - start, TimeDelta::days(4));
            assert!(end > before);
        }
    }

    #[tokio::test]
    async fn test_oversized_lookback_fails_every_ticker_without_requests() {
        let provider = MockProvider::new().with_closes("A", &[dec!(1), dec!(2)]);
        let sink = CollectingDiagnosticSink::new();
        let resolver = PriceResolver::new(Arc::new(provider.clone()), Arc::new(sink.clone()))
            .with_options(ResolverOptions {
                lookback_days: 200_000_000,
                ..ResolverOptions::default()
            });

        let resolution = resolver.resolve(&tickers(&["A", "B"])).await;

        assert_eq!(resolution.len(), 2);
        assert_eq!(resolution.percent_change("A"), Decimal::ZERO);
        assert!(provider.calls().is_empty());
        assert_eq!(
            sink.diagnostics(),
            vec![
                Diagnostic::fetch_failure("A", "Invalid lookback window: 200000000 days"),
                Diagnostic::fetch_failure("B", "Invalid lookback window: 200000000 days"),
            ]
        );
    }


    #[tokio::test]
    async fn test_resolve_returns_every_ticker() {
        let provider = MockProvider::new()
            .with_closes("A", &[dec!(100), dec!(102)])
            .with("B", MockResponse::NoData)
            .with("C", MockResponse::Fail("bad gateway".to_string()))
            .with_closes("D", &[dec!(40)]);
        let sink = CollectingDiagnosticSink::new();
        let resolver = resolver_with(&provider, &sink);

        let resolution = resolver.resolve(&tickers(&["A", "B", "C", "D"])).await;

        let changes = resolution.percent_changes();
        assert_eq!(changes.len(), 4);
        assert_eq!(changes["A"], dec!(2));
        assert_eq!(changes["B"], Decimal::ZERO);
        assert_eq!(changes["C"], Decimal::ZERO);
        assert_eq!(changes["D"], Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_no_data_emits_exactly_one_warning() {
        let provider = MockProvider::new().with("A", MockResponse::NoData);
        let sink = CollectingDiagnosticSink::new();
        let resolver = resolver_with(&provider, &sink);

        let resolution = resolver.resolve(&tickers(&["A"])).await;

        assert_eq!(resolution.percent_change("A"), Decimal::ZERO);
        assert_eq!(sink.diagnostics(), vec![Diagnostic::no_data("A")]);
        assert_eq!(resolution.diagnostics(), &[Diagnostic::no_data("A")]);
    }

    #[tokio::test]
    async fn test_empty_quote_list_counts_as_no_data() {
        let provider = MockProvider::new().with("A", MockResponse::Quotes(Vec::new()));
        let sink = CollectingDiagnosticSink::new();

        let resolution = resolver_with(&provider, &sink)
            .resolve(&tickers(&["A"]))
            .await;

        assert_eq!(resolution.outcome("A"), Some(&TickerOutcome::NoData));
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn test_insufficient_history_warning() {
        let provider = MockProvider::new().with_closes("A", &[dec!(12.5)]);
        let sink = CollectingDiagnosticSink::new();

        let resolution = resolver_with(&provider, &sink)
            .resolve(&tickers(&["A"]))
            .await;

        assert_eq!(resolution.percent_change("A"), Decimal::ZERO);
        assert_eq!(
            sink.diagnostics(),
            vec![Diagnostic::insufficient_history("A", 1)]
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_names_cause_and_isolates_others() {
        let provider = MockProvider::new()
            .with_closes("GOOD", &[dec!(100), dec!(105)])
            .with("BAD", MockResponse::Fail("connection reset".to_string()));
        let sink = CollectingDiagnosticSink::new();

        let resolution = resolver_with(&provider, &sink)
            .resolve(&tickers(&["BAD", "GOOD"]))
            .await;

        assert_eq!(resolution.percent_change("GOOD"), dec!(5));
        assert_eq!(resolution.percent_change("BAD"), Decimal::ZERO);

        let diagnostics = sink.for_ticker("BAD");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].to_string(),
            "Error fetching data for BAD: Provider error: MOCK - connection reset"
        );
        assert!(sink.for_ticker("GOOD").is_empty());
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_a_fetch_failure() {
        let provider = MockProvider::new();
        let sink = CollectingDiagnosticSink::new();

        let resolution = resolver_with(&provider, &sink)
            .resolve(&tickers(&["NOPE.NS"]))
            .await;

        assert_eq!(resolution.percent_change("NOPE.NS"), Decimal::ZERO);
        assert!(matches!(
            &sink.diagnostics()[0].kind,
            DiagnosticKind::ProviderFetchFailure { cause } if cause == "Symbol not found: NOPE.NS"
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_ticker_times_out_without_blocking_others() {
        let provider = MockProvider::new()
            .with("SLOW", MockResponse::Hang)
            .with_closes("FAST", &[dec!(10), dec!(11)]);
        let sink = CollectingDiagnosticSink::new();

        let resolution = resolver_with(&provider, &sink)
            .resolve(&tickers(&["FAST", "SLOW"]))
            .await;

        assert_eq!(resolution.percent_change("FAST"), dec!(10));
        assert_eq!(resolution.percent_change("SLOW"), Decimal::ZERO);
        assert!(matches!(
            &sink.for_ticker("SLOW")[0].kind,
            DiagnosticKind::ProviderFetchFailure { cause } if cause == "Timeout: MOCK"
        ));
    }

    #[tokio::test]
    async fn test_each_ticker_is_requested_once() {
        let provider = MockProvider::new()
            .with_closes("A", &[dec!(1), dec!(2)])
            .with_closes("B", &[dec!(1), dec!(2)]);
        let sink = CollectingDiagnosticSink::new();

        resolver_with(&provider, &sink)
            .resolve(&tickers(&["A", "B"]))
            .await;

        assert_eq!(provider.calls().len(), 2);
        assert_eq!(provider.calls_for("A"), 1);
        assert_eq!(provider.calls_for("B"), 1);
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let names: Vec<String> = (0..10).map(|i| format!("T{}", i)).collect();
        let mut provider = MockProvider::new();
        for name in &names {
            provider = provider.with_closes(name, &[dec!(1), dec!(1)]);
        }
        let sink = CollectingDiagnosticSink::new();
        let resolver = PriceResolver::new(Arc::new(provider.clone()), Arc::new(sink.clone()))
            .with_options(ResolverOptions {
                max_concurrency: Some(3),
                ..ResolverOptions::default()
            });

        let set: BTreeSet<String> = names.into_iter().collect();
        let resolution = resolver.resolve(&set).await;

        assert_eq!(resolution.len(), 10);
        assert!(provider.max_in_flight() <= 3);
        assert!(provider.max_in_flight() >= 2);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_empty_ticker_set_makes_no_requests() {
        let provider = MockProvider::new();
        let sink = CollectingDiagnosticSink::new();

        let resolution = resolver_with(&provider, &sink)
            .resolve(&BTreeSet::new())
            .await;

        assert!(resolution.is_empty());
        assert!(provider.calls().is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_default_options() {
        let options = ResolverOptions::default();
        assert_eq!(options.lookback_days, 7);
        assert_eq!(options.request_timeout.as_secs(), 10);
        assert!(options.max_concurrency.is_none());
    }
}
