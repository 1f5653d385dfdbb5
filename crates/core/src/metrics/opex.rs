//! Operating expense by item.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::season::SeasonWindow;

use super::facts::ExpenseFact;
use super::ratio::{round_dp, to_millions, yoy};

/// Operating expense report items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExpenseItem {
    /// 인건비
    HrCost,
    /// 광고비
    Advertising,
    /// 지급수수료
    Commission,
    /// VMD/매장보수
    Vmd,
    /// 저장품
    Storage,
    /// 샘플비
    Sample,
    /// 감가상각비
    Depreciation,
    /// 자가임차료
    SelfRent,
    /// 공통비
    CommonCost,
    /// 제조간접비
    ManufacturingIndirect,
    /// 복리비/차량/핸드폰
    Welfare,
    /// 여비교통비
    Travel,
    /// 기타
    Other,
}

impl ExpenseItem {
    /// Korean item name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HrCost => "인건비",
            Self::Advertising => "광고비",
            Self::Commission => "지급수수료",
            Self::Vmd => "VMD/매장보수",
            Self::Storage => "저장품",
            Self::Sample => "샘플비",
            Self::Depreciation => "감가상각비",
            Self::SelfRent => "자가임차료",
            Self::CommonCost => "공통비",
            Self::ManufacturingIndirect => "제조간접비",
            Self::Welfare => "복리비/차량/핸드폰",
            Self::Travel => "여비교통비",
            Self::Other => "기타",
        }
    }

    /// Display sequence.
    #[must_use]
    pub const fn seq(self) -> u32 {
        match self {
            Self::HrCost => 1,
            Self::Advertising => 2,
            Self::Commission => 3,
            Self::Vmd => 4,
            Self::Storage => 5,
            Self::Sample => 6,
            Self::Depreciation => 7,
            Self::SelfRent => 9,
            Self::CommonCost => 11,
            Self::ManufacturingIndirect => 12,
            Self::Welfare | Self::Travel | Self::Other => 999,
        }
    }

    /// Whether the item is rolled into the 기타영업비 subtotal.
    #[must_use]
    pub const fn is_etc(self) -> bool {
        matches!(
            self,
            Self::Commission
                | Self::Vmd
                | Self::Storage
                | Self::Sample
                | Self::Depreciation
                | Self::Welfare
                | Self::Travel
                | Self::Other
        )
    }
}

const SEQ_TOTAL: u32 = 0;
const SEQ_BRAND_TOTAL: u32 = 10;
const TOTAL_LABEL: &str = "전체";
const BRAND_TOTAL_LABEL: &str = "브랜드 영업비";

/// Maps cost-center categories to a report item. First match wins.
#[must_use]
pub fn map_expense_item(category1: Option<&str>, category2: Option<&str>) -> ExpenseItem {
    match (category1, category2) {
        (Some("인건비"), _) => ExpenseItem::HrCost,
        (Some("공통비"), _) => ExpenseItem::CommonCost,
        (_, Some("저장품사용(쇼핑백/사은품)")) => ExpenseItem::Storage,
        (_, Some("감가상각비(매장외)")) => ExpenseItem::Depreciation,
        (Some("자가임차료(사옥)"), _) => ExpenseItem::SelfRent,
        (Some("VMD/ 매장보수대"), _) => ExpenseItem::Vmd,
        (Some("광고선전비"), _) => ExpenseItem::Advertising,
        (Some("제간비" | "지급수수료"), _) => ExpenseItem::Commission,
        (Some("샘플대(제작/구입)"), _) => ExpenseItem::Sample,
        (Some("기타영업비"), Some("여비교통비")) => ExpenseItem::Travel,
        (
            Some("기타영업비"),
            Some(
                "복리비/차량/핸드폰" | "복리후생비" | "복리비" | "차량유지비" | "차량관리비"
                | "통신비" | "핸드폰비" | "차량비",
            ),
        ) => ExpenseItem::Welfare,
        _ => ExpenseItem::Other,
    }
}

/// Current and prior-year amounts of one line, in millions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseLine {
    /// Current year.
    pub amt: Decimal,
    /// Prior year.
    pub amt_py: Decimal,
    /// Year-over-year index.
    pub yoy: Option<Decimal>,
}

impl ExpenseLine {
    fn from_won(cy: Decimal, py: Decimal) -> Self {
        Self {
            amt: to_millions(cy),
            amt_py: to_millions(py),
            yoy: yoy(cy, py),
        }
    }
}

/// One report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseRow {
    /// Display sequence. `0` is the grand total, `10` the brand total.
    #[serde(rename = "SEQ")]
    pub seq: u32,
    /// Item name.
    #[serde(rename = "ITEM_NM")]
    pub item: String,
    /// Current year in millions.
    #[serde(rename = "AMT_CY")]
    pub amt_cy: Decimal,
    /// Prior year in millions.
    #[serde(rename = "AMT_PY")]
    pub amt_py: Decimal,
    /// Year-over-year index.
    #[serde(rename = "YOY")]
    pub yoy: Option<Decimal>,
}

/// The detail lines rolled into 기타영업비.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EtcExpenseItems {
    /// 지급수수료
    pub commission: ExpenseLine,
    /// VMD/매장보수
    pub vmd: ExpenseLine,
    /// 저장품
    pub storage: ExpenseLine,
    /// 샘플비
    pub sample: ExpenseLine,
    /// 감가상각비
    pub depreciation: ExpenseLine,
    /// 복리비/차량/핸드폰
    pub welfare: ExpenseLine,
    /// 여비교통비
    pub travel: ExpenseLine,
    /// 기타
    pub other: ExpenseLine,
}

/// Operating expense report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingExpenseReport {
    /// Rows ordered by sequence.
    #[serde(rename = "data")]
    pub rows: Vec<ExpenseRow>,
    /// Lines keyed by item name.
    pub items: BTreeMap<String, ExpenseLine>,
    /// All items including 공통비 and 제조간접비.
    pub total: ExpenseLine,
    /// All items except 공통비.
    pub brand_total: ExpenseLine,
    /// 기타영업비 subtotal of the rounded detail lines.
    pub etc_total: ExpenseLine,
    /// 인건비
    pub hr_cost: ExpenseLine,
    /// 광고비
    pub ad_expense: ExpenseLine,
    /// 자가임차료
    pub self_rent: ExpenseLine,
    /// 공통비
    pub common_cost: ExpenseLine,
    /// 제조간접비
    pub mfc_indirect: ExpenseLine,
    /// Detail lines of 기타영업비.
    pub etc_items: EtcExpenseItems,
}

/// Aggregates cost-center expense for a window and its prior year.
///
/// Manufacturing-department usage is reported as 제조간접비 with its sign
/// forced negative. The line is always present even when no rows match.
#[must_use]
pub fn aggregate_operating_expense(
    facts: &[ExpenseFact],
    window: &SeasonWindow,
) -> OperatingExpenseReport {
    let py_window = window.prior_year();
    let mut sums: BTreeMap<ExpenseItem, (Decimal, Decimal)> = BTreeMap::new();
    let mut mfc = (Decimal::ZERO, Decimal::ZERO);

    for fact in facts {
        let in_cy = window.in_period(fact.month);
        let in_py = py_window.in_period(fact.month);
        if !in_cy && !in_py {
            continue;
        }

        let item = map_expense_item(fact.category1.as_deref(), fact.category2.as_deref());
        let entry = sums.entry(item).or_default();
        if in_cy {
            entry.0 += fact.total_amount;
            mfc.0 += fact.manufacturing_amount;
        }
        if in_py {
            entry.1 += fact.total_amount;
            mfc.1 += fact.manufacturing_amount;
        }
    }
    sums.insert(
        ExpenseItem::ManufacturingIndirect,
        (-mfc.0.abs(), -mfc.1.abs()),
    );

    let mut total = (Decimal::ZERO, Decimal::ZERO);
    let mut brand = (Decimal::ZERO, Decimal::ZERO);
    for (item, (cy, py)) in &sums {
        total.0 += cy;
        total.1 += py;
        if *item != ExpenseItem::CommonCost {
            brand.0 += cy;
            brand.1 += py;
        }
    }

    let items: BTreeMap<String, ExpenseLine> = sums
        .iter()
        .map(|(item, (cy, py))| (item.label().to_string(), ExpenseLine::from_won(*cy, *py)))
        .collect();

    let mut rows: Vec<ExpenseRow> = sums
        .iter()
        .map(|(item, (cy, py))| row(item.seq(), item.label(), *cy, *py))
        .collect();
    rows.push(row(SEQ_BRAND_TOTAL, BRAND_TOTAL_LABEL, brand.0, brand.1));
    rows.push(row(SEQ_TOTAL, TOTAL_LABEL, total.0, total.1));
    rows.sort_by(|a, b| (a.seq, &a.item).cmp(&(b.seq, &b.item)));

    let line = |item: ExpenseItem| items.get(item.label()).copied().unwrap_or_default();

    let (etc_amt, etc_amt_py) = sums
        .keys()
        .filter(|item| item.is_etc())
        .map(|item| line(*item))
        .fold((Decimal::ZERO, Decimal::ZERO), |acc, l| {
            (acc.0 + l.amt, acc.1 + l.amt_py)
        });
    let etc_total = ExpenseLine {
        amt: etc_amt,
        amt_py: etc_amt_py,
        yoy: (etc_amt_py > Decimal::ZERO)
            .then(|| round_dp(etc_amt / etc_amt_py * Decimal::ONE_HUNDRED, 0)),
    };

    let etc_items = EtcExpenseItems {
        commission: line(ExpenseItem::Commission),
        vmd: line(ExpenseItem::Vmd),
        storage: line(ExpenseItem::Storage),
        sample: line(ExpenseItem::Sample),
        depreciation: line(ExpenseItem::Depreciation),
        welfare: line(ExpenseItem::Welfare),
        travel: line(ExpenseItem::Travel),
        other: line(ExpenseItem::Other),
    };

    OperatingExpenseReport {
        total: ExpenseLine::from_won(total.0, total.1),
        brand_total: ExpenseLine::from_won(brand.0, brand.1),
        etc_total,
        hr_cost: line(ExpenseItem::HrCost),
        ad_expense: line(ExpenseItem::Advertising),
        self_rent: line(ExpenseItem::SelfRent),
        common_cost: line(ExpenseItem::CommonCost),
        mfc_indirect: line(ExpenseItem::ManufacturingIndirect),
        etc_items,
        rows,
        items,
    }
}

fn row(seq: u32, label: &str, cy: Decimal, py: Decimal) -> ExpenseRow {
    let line = ExpenseLine::from_won(cy, py);
    ExpenseRow {
        seq,
        item: label.to_string(),
        amt_cy: line.amt,
        amt_py: line.amt_py,
        yoy: line.yoy,
    }
}
