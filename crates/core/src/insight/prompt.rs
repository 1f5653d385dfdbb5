//! Prompt text for the historical insight.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use rust_decimal::Decimal;

use crate::metrics::ratio::round_dp;

use super::types::{ChannelAmount, HistoricalInsightInput, SeasonSnapshot};

/// Seasons covered by the historical prompt, oldest first.
pub const HISTORICAL_SEASONS: [&str; 3] = ["23S", "24S", "25S"];

/// System prompt sent ahead of every insight request.
pub const SYSTEM_PROMPT: &str = "당신은 패션 리테일 FP&A 담당자를 위한 사업계획 분석 어시스턴트입니다.
F&F 그룹의 브랜드(MLB, MLB KIDS, DISCOVERY, DUVETICA, SERGIO TACCHINI) 실적을 분석하고
인사이트를 제공합니다. 분석은 항상 데이터 기반으로 진행하며, 실무적으로 활용 가능한
구체적인 시사점을 도출합니다.";

type Getter = fn(&SeasonSnapshot) -> (Option<Decimal>, Option<Decimal>);

fn cell(value: Option<Decimal>) -> String {
    value.map_or_else(String::new, |v| format!("{:.1}", round_dp(v, 1)))
}

/// `value / actual * 100`, only when both are present and non-zero.
fn margin(value: Option<Decimal>, actual: Option<Decimal>) -> Option<Decimal> {
    let (value, actual) = (value?, actual?);
    (!value.is_zero() && !actual.is_zero()).then(|| value / actual * Decimal::ONE_HUNDRED)
}

fn amount(value: Option<Decimal>) -> (Option<Decimal>, Option<Decimal>) {
    (value, None)
}

const PNL_ROWS: [(&str, Getter); 35] = [
    ("기말재고 TAG금액", |d| amount(d.end_stock)),
    ("발주금액(당시즌의류)", |d| (d.order_amount, d.sales_rate)),
    ("판매TAG", |d| amount(d.sales_tag)),
    ("실판가", |d| amount(d.actual_sales)),
    ("할인율", |d| (None, d.discount_rate)),
    ("부가세차감(출고)매출", |d| amount(d.vat_exc_sales)),
    ("출고가(V+)", |d| amount(d.shipping_price)),
    ("매출원가(실적)", |d| amount(d.cogs)),
    ("재고평가감(환입)", |d| amount(d.inventory_valuation_reversal)),
    ("재고평가감(추가)", |d| amount(d.inventory_valuation_addition)),
    ("매출원가 소계", |d| amount(d.cogs_total)),
    ("매출총이익", |d| amount(d.gross_profit)),
    ("매출총이익률", |d| (None, margin(d.gross_profit, d.actual_sales))),
    ("로열티", |d| amount(d.direct_cost.and_then(|c| c.royalty))),
    ("물류비", |d| amount(d.direct_cost.and_then(|c| c.logistics))),
    ("보관료", |d| amount(d.direct_cost.and_then(|c| c.storage))),
    ("카드수수료", |d| amount(d.direct_cost.and_then(|c| c.card_commission))),
    ("매장임차료", |d| amount(d.direct_cost.and_then(|c| c.shop_rent))),
    ("감가상각비(매장)", |d| amount(d.direct_cost.and_then(|c| c.shop_depreciation))),
    ("온라인수수료(제휴)", |d| amount(d.direct_cost.and_then(|c| c.online_commission))),
    ("중간관리자 수수료", |d| {
        amount(d.direct_cost.and_then(|c| c.store_manager_commission))
    }),
    ("면세 판매직수수료", |d| amount(d.direct_cost.and_then(|c| c.duty_free_commission))),
    ("직영 판매직수수료", |d| {
        amount(d.direct_cost.and_then(|c| c.directly_managed_commission))
    }),
    ("직접비 합계", |d| amount(d.direct_cost.and_then(|c| c.total))),
    ("직접이익", |d| amount(d.direct_profit)),
    ("직접이익률", |d| (None, margin(d.direct_profit, d.actual_sales))),
    ("광고비", |d| amount(d.operating_expense.map(|o| o.ad_expense))),
    ("인건비", |d| amount(d.operating_expense.map(|o| o.hr_cost))),
    ("기타영업비", |d| amount(d.operating_expense.map(|o| o.etc_total))),
    ("자가임차료", |d| amount(d.operating_expense.map(|o| o.self_rent))),
    ("공통비 배부", |d| amount(d.operating_expense.map(|o| o.common_cost))),
    ("제조간접비 차감", |d| amount(d.operating_expense.map(|o| o.mfc_indirect))),
    ("영업비 합계", |d| amount(d.operating_expense.map(|o| o.total))),
    ("영업이익", |d| amount(d.operating_profit)),
    ("영업이익률", |d| (None, margin(d.operating_profit, d.actual_sales))),
];

fn pnl_table(input: &HistoricalInsightInput) -> String {
    let mut header = String::from("항목");
    for season in HISTORICAL_SEASONS {
        let _ = write!(header, ",{season}_금액(백만원),{season}_비율(%)");
    }

    let mut lines = vec![header];
    for (label, getter) in &PNL_ROWS {
        let mut line = (*label).to_string();
        for season in HISTORICAL_SEASONS {
            let (value, percent) = input.pnl_data.get(season).map_or((None, None), *getter);
            let _ = write!(line, ",{},{}", cell(value), cell(percent));
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn channel_value(list: Option<&Vec<ChannelAmount>>, channel: &str) -> Option<Decimal> {
    list?
        .iter()
        .find(|c| c.channel == channel)
        .and_then(|c| c.amount)
}

fn channel_tables(input: &HistoricalInsightInput) -> String {
    let channels: BTreeSet<&str> = HISTORICAL_SEASONS
        .iter()
        .filter_map(|season| input.pnl_data.get(*season))
        .filter_map(|d| d.sales_tag_channels.as_ref())
        .flatten()
        .map(|c| c.channel.as_str())
        .collect();

    let header = format!("채널,{}", HISTORICAL_SEASONS.join(","));
    let section = |title: &str, pick: fn(&SeasonSnapshot) -> Option<&Vec<ChannelAmount>>| {
        let mut lines = vec![format!("\n{title}"), header.clone()];
        for channel in &channels {
            let values: Vec<String> = HISTORICAL_SEASONS
                .iter()
                .map(|season| {
                    let list = input.pnl_data.get(*season).and_then(pick);
                    cell(channel_value(list, channel))
                })
                .collect();
            lines.push(format!("{channel},{}", values.join(",")));
        }
        lines.join("\n")
    };

    [
        section("채널별 판매TAG (백만원)", |d| d.sales_tag_channels.as_ref()),
        section("채널별 실판가 (백만원)", |d| d.actual_sales_channels.as_ref()),
    ]
    .join("\n")
}

/// Builds the user prompt for a brand's last three seasons.
///
/// Amounts and ratios are printed with one decimal place; anything missing is
/// an empty cell. Channel rows cover every channel that has sales TAG in any
/// season, sorted by name.
#[must_use]
pub fn build_historical_prompt(input: &HistoricalInsightInput) -> String {
    let brand_ko = input.brand_ko.as_deref().unwrap_or(&input.brand);
    let csv = format!("{}\n{}", pnl_table(input), channel_tables(input));

    format!(
        "당신은 패션 리테일 FP&A(Financial Planning & Analysis) 전문가입니다.
아래는 {brand_ko}({brand}) 브랜드의 최근 3개 시즌(23S, 24S, 25S) 요약 손익계산서 전체 데이터를 CSV 형식으로 정리한 것입니다.

[중요] 모든 금액은 백만원 단위입니다. 예를 들어, 237,734는 237,734백만원을 의미합니다.

{csv}

위 CSV 데이터를 기반으로 CEO에게 보고할 수 있는 수준의 인사이트를 존댓말로 작성해주세요. 다음 항목에 대해 각각 3줄씩 분석해주세요:

1. 매출 트렌드 분석: 판매TAG, 실판가, 채널별 매출 성장 추이와 주요 요인
2. 수익성 분석: 매출총이익률, 직접이익률, 영업이익률 변화 및 원인 분석
3. 비용 구조 분석: 직접비(로열티, 물류비, 보관료 등)와 영업비(광고비, 인건비, 기타영업비 등)의 변화 추이
4. 재고 및 발주 분석: 기말재고, 발주금액, 판매율 변화와 재고 효율성
5. 채널별 성과 분석: 채널별 판매TAG와 실판가 비교를 통한 채널별 수익성
6. 26SS 사업계획 시사점: 다음 시즌 계획 수립 시 고려해야 할 핵심 포인트 및 개선 방안

각 항목을 3줄씩 작성해주세요. 한국어로 답변해주세요.
중요: 응답에서 별표(**)나 볼드 표시를 사용하지 말고, 순수 텍스트로만 작성해주세요.",
        brand = input.brand,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn channels(items: &[(&str, Decimal)]) -> Option<Vec<ChannelAmount>> {
        Some(
            items
                .iter()
                .map(|(name, amount)| ChannelAmount {
                    channel: (*name).to_string(),
                    amount: Some(*amount),
                })
                .collect(),
        )
    }

    fn input() -> HistoricalInsightInput {
        let snapshot = SeasonSnapshot {
            actual_sales: Some(dec!(1000)),
            gross_profit: Some(dec!(555.55)),
            sales_tag: Some(dec!(2000)),
            sales_tag_channels: channels(&[("백화점", dec!(1200)), ("대리점", dec!(800))]),
            actual_sales_channels: channels(&[("백화점", dec!(600))]),
            ..SeasonSnapshot::default()
        };
        let mut pnl_data = BTreeMap::new();
        pnl_data.insert("24S".to_string(), snapshot);
        HistoricalInsightInput {
            brand: "MLB".to_string(),
            brand_ko: Some("엠엘비".to_string()),
            pnl_data,
        }
    }

    #[test]
    fn test_header_and_brand_line() {
        let prompt = build_historical_prompt(&input());
        assert!(prompt.contains(
            "항목,23S_금액(백만원),23S_비율(%),24S_금액(백만원),24S_비율(%),25S_금액(백만원),25S_비율(%)"
        ));
        assert!(prompt.contains("엠엘비(MLB) 브랜드의 최근 3개 시즌"));
    }

    #[test]
    fn test_rows_print_one_decimal_and_blank_cells() {
        let prompt = build_historical_prompt(&input());
        assert!(prompt.contains("\n판매TAG,,,2000.0,,,\n"));
        assert!(prompt.contains("\n매출총이익,,,555.6,,,\n"));
        assert!(prompt.contains("\n매출총이익률,,,,55.6,,\n"));
        assert!(prompt.contains("\n영업이익률,,,,,,\n"));
    }

    #[test]
    fn test_channel_tables_use_sales_tag_channels() {
        let prompt = build_historical_prompt(&input());
        assert!(prompt.contains(
            "\n\n채널별 판매TAG (백만원)\n채널,23S,24S,25S\n대리점,,800.0,\n백화점,,1200.0,"
        ));
        assert!(prompt.contains(
            "\n\n채널별 실판가 (백만원)\n채널,23S,24S,25S\n대리점,,,\n백화점,,600.0,"
        ));
    }

    #[test]
    fn test_missing_korean_name_falls_back_to_brand() {
        let mut request = input();
        request.brand_ko = None;
        assert!(build_historical_prompt(&request).contains("MLB(MLB) 브랜드"));
    }

    #[test]
    fn test_request_deserializes_dashboard_payload() {
        let body = serde_json::json!({
            "brand": "MLB",
            "brandKo": "엠엘비",
            "pnlData": {
                "23S": {
                    "salesTag": 1234.5,
                    "discountRate": null,
                    "salesTagChannels": [{"CHNL_NM": "백화점", "SALE_TAG_AMT": 10}],
                    "actualSalesChannels": [{"CHNL_NM": "백화점", "ACT_SALE_AMT": 8}]
                }
            }
        });
        let request: HistoricalInsightInput = serde_json::from_value(body).unwrap();
        let snapshot = &request.pnl_data["23S"];
        assert_eq!(snapshot.sales_tag, Some(dec!(1234.5)));
        assert_eq!(snapshot.discount_rate, None);
        assert_eq!(
            snapshot.actual_sales_channels.as_ref().unwrap()[0].amount,
            Some(dec!(8))
        );
    }
}
