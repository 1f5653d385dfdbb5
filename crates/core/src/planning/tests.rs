//! Tests for the planning calculators.

use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::season::SeasonCode;

fn channel(name: &str, base: Decimal) -> ChannelBaseline {
    ChannelBaseline {
        channel: name.to_string(),
        channel_ko: None,
        base_revenue: base,
    }
}

fn sci(raw: &str) -> Decimal {
    Decimal::from_scientific(raw).unwrap()
}

fn any_decimal() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>(), any::<bool>(), 0u32..=28)
        .prop_map(|(lo, mid, hi, negative, scale)| {
            Decimal::from_parts(lo, mid, hi, negative, scale)
        })
}

fn scenario() -> SimulationInput {
    serde_json::from_value(serde_json::json!({
        "channels": [
            { "channel": "Department", "baseRevenue": "100000" },
            { "channel": "Online", "baseRevenue": "50000" }
        ]
    }))
    .unwrap()
}

fn sales_row(
    channel: PlanChannel,
    season: &str,
    category: ItemCategory,
    tag: Decimal,
    discount: Decimal,
) -> SalesInputRow {
    SalesInputRow {
        channel_code: channel,
        season_code: SeasonCode::parse(season).unwrap(),
        category_code: category,
        sales_tag_amt: tag,
        discount_rate: discount,
        actual_sales_amt: None,
    }
}

// ============================================================================
// Simulation
// ============================================================================

#[test]
fn test_scenario_defaults() {
    let input = scenario();
    assert_eq!(input.common_growth_rate, dec!(5));
    assert!(input.use_common_rate);
    assert_eq!(input.target_mu, dec!(250));
    assert_eq!(input.ad_expense, dec!(50000));
    assert_eq!(input.headcount, dec!(100));
    assert_eq!(input.hr_cost_per_person, dec!(600));
}

#[test]
fn test_simulate_common_rate() {
    let result = simulate(&scenario()).unwrap();

    assert_eq!(result.total_revenue, dec!(157500));
    // 157500 / 2.5
    assert_eq!(result.total_cogs, dec!(63000));
    assert_eq!(result.gross_profit, dec!(94500));
    assert_eq!(result.hr_cost, dec!(60000));
    assert_eq!(result.operating_profit, dec!(-15500));
    assert_eq!(result.gross_profit_rate, Some(dec!(60.0)));
    assert_eq!(result.operating_profit_rate, Some(dec!(-9.8)));
    assert!(result.comparison.is_empty());
}

#[test]
fn test_simulate_per_channel_rates() {
    let mut input = scenario();
    input.use_common_rate = false;
    input.channel_growth_rates = vec![ChannelGrowth {
        channel: "Online".to_string(),
        growth_rate: dec!(20),
    }];

    let result = simulate(&input).unwrap();
    let revenues: Vec<_> = result
        .channel_revenues
        .iter()
        .map(|c| (c.channel.as_str(), c.plan_revenue, c.growth_rate))
        .collect();
    assert_eq!(
        revenues,
        vec![
            ("Department", dec!(100000), Decimal::ZERO),
            ("Online", dec!(60000), dec!(20)),
        ]
    );
}

#[test]
fn test_simulate_without_revenue_has_no_rates() {
    let mut input = scenario();
    input.channels.clear();
    let result = simulate(&input).unwrap();
    assert_eq!(result.total_revenue, Decimal::ZERO);
    assert_eq!(result.gross_profit_rate, None);
    assert_eq!(result.operating_profit_rate, None);
}

#[rstest]
#[case(Decimal::ZERO)]
#[case(dec!(-100))]
fn test_simulate_rejects_non_positive_markup(#[case] mu: Decimal) {
    let mut input = scenario();
    input.target_mu = mu;
    assert_eq!(simulate(&input), Err(PlanningError::InvalidMarkup(mu)));
}

#[test]
fn test_simulate_rejects_negative_headcount() {
    let mut input = scenario();
    input.headcount = dec!(-1);
    assert_eq!(
        simulate(&input),
        Err(PlanningError::NegativeInput("headcount"))
    );
}

#[rstest]
#[case::headcount_cost("1e20", "1e20", "250", "1e5", "hrCost")]
#[case::tiny_markup("100", "600", "1e-28", "7.9e25", "totalCogs")]
#[case::huge_revenue("100", "600", "250", "7.9e28", "planRevenue")]
#[case::deep_loss("7.9e28", "1", "0.001", "1e22", "operatingProfit")]
fn test_simulate_reports_overflow(
    #[case] headcount: &str,
    #[case] cost_per_person: &str,
    #[case] mu: &str,
    #[case] base: &str,
    #[case] figure: &'static str,
) {
    let mut input = scenario();
    input.channels = vec![channel("A", sci(base))];
    input.headcount = sci(headcount);
    input.hr_cost_per_person = sci(cost_per_person);
    input.target_mu = sci(mu);
    assert_eq!(simulate(&input), Err(PlanningError::Overflow(figure)));
}

#[test]
fn test_simulate_reports_overflowing_totals() {
    let mut input = scenario();
    input.common_growth_rate = Decimal::ZERO;
    input.channels = vec![channel("A", sci("5e28")), channel("B", sci("5e28"))];
    assert_eq!(
        simulate(&input),
        Err(PlanningError::Overflow("totalRevenue"))
    );

    let mut input = scenario();
    input.baseline = Some(BaselinePnl {
        revenue: Decimal::MIN,
        ..BaselinePnl::default()
    });
    assert_eq!(simulate(&input), Err(PlanningError::Overflow("change")));
}

#[test]
fn test_comparison_against_baseline() {
    let mut input = scenario();
    input.baseline = Some(BaselinePnl {
        revenue: dec!(150000),
        cogs: dec!(60000),
        gross_profit: dec!(90000),
        ad_expense: dec!(50000),
        hr_cost: dec!(0),
        operating_profit: dec!(-20000),
    });

    let result = simulate(&input).unwrap();
    let metrics: Vec<_> = result.comparison.iter().map(|r| r.metric).collect();
    assert_eq!(
        metrics,
        vec!["매출", "매출원가", "매출총이익", "광고선전비", "인건비", "영업이익"]
    );

    let revenue = &result.comparison[0];
    assert_eq!(revenue.change, dec!(7500));
    assert_eq!(revenue.change_rate, Some(dec!(5.0)));

    // zero and negative bases have no rate
    assert_eq!(result.comparison[4].change_rate, None);
    assert_eq!(result.comparison[5].change, dec!(4500));
    assert_eq!(result.comparison[5].change_rate, None);
}

#[test]
fn test_simulation_result_json_shape() {
    let result = simulate(&scenario()).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("totalRevenue").is_some());
    assert!(json.get("channelRevenues").is_some());
    assert!(json["channelRevenues"][0].get("planRevenue").is_some());
}

proptest! {
    /// Feature: plan-simulation, Property 1: operating profit is gross profit less ad and HR cost
    #[test]
    fn prop_operating_profit_identity(
        base in 0i64..10_000_000,
        growth in -50i64..100,
        mu in 100i64..400,
        ad in 0i64..100_000,
    ) {
        let input = SimulationInput {
            channels: vec![channel("A", Decimal::from(base))],
            channel_growth_rates: Vec::new(),
            common_growth_rate: Decimal::from(growth),
            use_common_rate: true,
            target_mu: Decimal::from(mu),
            ad_expense: Decimal::from(ad),
            headcount: dec!(10),
            hr_cost_per_person: dec!(600),
            baseline: None,
        };
        let result = simulate(&input).unwrap();
        prop_assert_eq!(result.gross_profit, result.total_revenue - result.total_cogs);
        prop_assert_eq!(
            result.operating_profit,
            result.gross_profit - result.ad_expense - result.hr_cost
        );
    }

    /// Feature: plan-simulation, Property 2: any decimal input yields a result or an error
    #[test]
    fn prop_simulate_is_total(
        base in any_decimal(),
        growth in any_decimal(),
        mu in any_decimal(),
        headcount in any_decimal(),
        cost_per_person in any_decimal(),
        baseline_revenue in any_decimal(),
    ) {
        let input = SimulationInput {
            channels: vec![channel("A", base), channel("B", base)],
            channel_growth_rates: Vec::new(),
            common_growth_rate: growth,
            use_common_rate: true,
            target_mu: mu,
            ad_expense: dec!(50000),
            headcount,
            hr_cost_per_person: cost_per_person,
            baseline: Some(BaselinePnl {
                revenue: baseline_revenue,
                ..BaselinePnl::default()
            }),
        };
        if let Ok(result) = simulate(&input) {
            prop_assert_eq!(result.comparison.len(), 6);
        }
    }
}

// ============================================================================
// Sales input
// ============================================================================

#[rstest]
#[case("DEPT", PlanChannel::Dept)]
#[case("online_direct", PlanChannel::OnlineDirect)]
#[case("면세점", PlanChannel::Df)]
#[case(" 아울렛(직) ", PlanChannel::OutletDirect)]
fn test_plan_channel_parse(#[case] raw: &str, #[case] expected: PlanChannel) {
    assert_eq!(PlanChannel::parse(raw), Ok(expected));
}

#[test]
fn test_unknown_codes_are_rejected() {
    assert!(matches!(
        PlanChannel::parse("MALL"),
        Err(PlanningError::UnknownCode { kind: "channel", .. })
    ));
    assert_eq!(ItemCategory::parse("신발"), Ok(ItemCategory::Shoes));
    assert!(ItemCategory::parse("SOCKS").is_err());
}

#[test]
fn test_plan_codes_serialize_as_sheet_codes() {
    assert_eq!(
        serde_json::to_value(PlanChannel::DirectStreet).unwrap(),
        "DIRECT_STREET"
    );
    assert_eq!(serde_json::to_value(ItemCategory::Eq).unwrap(), "EQ");
    for ch in PlanChannel::ALL {
        assert_eq!(serde_json::to_value(ch).unwrap(), ch.code());
    }
}

#[rstest]
#[case(dec!(1000), dec!(30), dec!(700))]
#[case(dec!(999), dec!(33.3), dec!(666))]
#[case(dec!(1000), Decimal::ZERO, dec!(1000))]
fn test_actual_from_discount(
    #[case] tag: Decimal,
    #[case] rate: Decimal,
    #[case] expected: Decimal,
) {
    assert_eq!(actual_from_discount(tag, rate), Ok(expected));
}

#[test]
fn test_discount_bounds() {
    assert_eq!(
        actual_from_discount(dec!(100), dec!(101)),
        Err(PlanningError::InvalidDiscountRate(dec!(101)))
    );
    assert_eq!(discount_from_actual(dec!(3), dec!(2)), Ok(dec!(33.3)));
    assert_eq!(discount_from_actual(Decimal::ZERO, dec!(2)), Ok(Decimal::ZERO));
    assert_eq!(
        discount_from_actual(dec!(0.001), Decimal::MAX),
        Err(PlanningError::Overflow("discountRate"))
    );
}

#[test]
fn test_summarize_sales_plan() {
    let base = vec![
        sales_row(PlanChannel::Dept, "25S", ItemCategory::Wear, dec!(1000), dec!(20)),
        sales_row(PlanChannel::Df, "24F", ItemCategory::Head, dec!(500), dec!(0)),
    ];
    let mut online = sales_row(
        PlanChannel::OnlineDirect,
        "26S",
        ItemCategory::Wear,
        dec!(400),
        dec!(50),
    );
    online.actual_sales_amt = Some(dec!(300));
    let plan = vec![
        sales_row(PlanChannel::Dept, "26S", ItemCategory::Wear, dec!(1200), dec!(25)),
        online,
    ];

    let summary = summarize_sales_plan(&base, &plan).unwrap();

    let channels: Vec<_> = summary
        .by_channel
        .iter()
        .map(|l| (l.code.as_str(), l.base, l.plan))
        .collect();
    assert_eq!(
        channels,
        vec![
            ("DEPT", dec!(800), dec!(900)),
            ("DF", dec!(500), Decimal::ZERO),
            ("ONLINE_DIRECT", Decimal::ZERO, dec!(300)),
        ]
    );
    assert_eq!(summary.by_channel[0].change_rate, Some(dec!(12.5)));
    assert_eq!(summary.by_channel[2].change_rate, None);

    let seasons: Vec<_> = summary.by_season.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(seasons, vec!["24F", "25S", "26S"]);

    let categories: Vec<_> = summary.by_category.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(categories, vec!["모자", "의류"]);

    assert_eq!(summary.total.base, dec!(1300));
    assert_eq!(summary.total.plan, dec!(1200));
    assert_eq!(summary.total.change, dec!(-100));
    assert_eq!(summary.total.change_rate, Some(dec!(-7.7)));
}

#[test]
fn test_summarize_rejects_bad_discount() {
    let rows = vec![sales_row(
        PlanChannel::Rf,
        "26S",
        ItemCategory::Bag,
        dec!(100),
        dec!(-5),
    )];
    assert!(summarize_sales_plan(&[], &rows).is_err());
}

#[test]
fn test_summarize_reports_overflowing_sums() {
    let huge = |channel| {
        sales_row(channel, "26S", ItemCategory::Wear, sci("7.9e28"), Decimal::ZERO)
    };

    let plan = vec![huge(PlanChannel::Dept), huge(PlanChannel::Dept)];
    assert_eq!(
        summarize_sales_plan(&[], &plan),
        Err(PlanningError::Overflow("plan"))
    );

    let mut refund = huge(PlanChannel::Df);
    refund.actual_sales_amt = Some(Decimal::MIN);
    assert_eq!(
        summarize_sales_plan(&[refund], &[huge(PlanChannel::Df)]),
        Err(PlanningError::Overflow("change"))
    );
}
