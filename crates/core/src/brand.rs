//! Brand registry and brand-specific reporting rules.

use planboard_shared::BrandCode;
use serde::Serialize;

/// A brand known to the planning dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    /// URL-friendly identifier.
    pub id: &'static str,
    /// Warehouse brand code.
    pub code: &'static str,
    /// English name.
    pub name: &'static str,
    /// Korean name.
    pub name_ko: &'static str,
    /// Short description.
    pub description: &'static str,
}

/// Every brand in display order.
pub const BRANDS: [Brand; 5] = [
    Brand {
        id: "mlb",
        code: "M",
        name: "MLB",
        name_ko: "엠엘비",
        description: "글로벌 스트리트 패션 브랜드",
    },
    Brand {
        id: "mlb-kids",
        code: "I",
        name: "MLB KIDS",
        name_ko: "엠엘비 키즈",
        description: "키즈 스트리트 패션 브랜드",
    },
    Brand {
        id: "discovery",
        code: "X",
        name: "DISCOVERY",
        name_ko: "디스커버리",
        description: "프리미엄 아웃도어 라이프스타일",
    },
    Brand {
        id: "duvetica",
        code: "V",
        name: "DUVETICA",
        name_ko: "듀베티카",
        description: "이탈리안 프리미엄 다운웨어",
    },
    Brand {
        id: "sergio-tacchini",
        code: "ST",
        name: "SERGIO TACCHINI",
        name_ko: "세르지오 타키니",
        description: "이탈리안 스포츠 헤리티지",
    },
];

/// Looks up a brand by warehouse code.
#[must_use]
pub fn find_by_code(code: &BrandCode) -> Option<&'static Brand> {
    BRANDS.iter().find(|brand| brand.code == code.as_str())
}

/// Looks up a brand by its identifier.
#[must_use]
pub fn find_by_id(id: &str) -> Option<&'static Brand> {
    BRANDS.iter().find(|brand| brand.id == id)
}

/// What the royalty percentage is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoyaltyBasis {
    /// Shipping price less 35% of retail actual sales.
    ShippingLessRetail,
    /// Actual sales.
    ActualSales,
}

/// Royalty basis for a brand. MLB and MLB KIDS pay royalty on shipping price.
#[must_use]
pub fn royalty_basis(code: &BrandCode) -> RoyaltyBasis {
    match code.as_str() {
        "M" | "I" => RoyaltyBasis::ShippingLessRetail,
        _ => RoyaltyBasis::ActualSales,
    }
}

/// Inventory revaluation rows left out of cost of sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValuationExclusion {
    /// Product season.
    pub season: &'static str,
    /// Middle class code of the revaluation row.
    pub middle_class_code: &'static str,
}

/// Revaluation exclusion for a brand, if any.
#[must_use]
pub fn valuation_exclusion(code: &BrandCode) -> Option<ValuationExclusion> {
    (code.as_str() == "M").then_some(ValuationExclusion {
        season: "21S",
        middle_class_code: "A0100A0140",
    })
}
