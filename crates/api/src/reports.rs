//! Report composition.
//!
//! Each report fetches the warehouse slices its aggregator reads and hands
//! them to the core crate. The season summary fetches every slice once and
//! derives the P&L statement from whatever succeeded.

use planboard_core::brand::{royalty_basis, valuation_exclusion};
use planboard_core::metrics::{
    ChannelSalesReport, CostOfSales, DirectCostReport, EndStockReport, OperatingExpenseReport,
    OrderAmount, SalesFact, SalesMeasure, StockFact, VatExcludedReport, aggregate_cost_of_sales,
    aggregate_direct_cost, aggregate_end_stock, aggregate_operating_expense,
    aggregate_order_amount, aggregate_sales, aggregate_vat_excluded,
};
use planboard_core::pnl::{
    DirectCostSummary, OperatingExpenseSummary, PnlInputs, PnlStatement, derive_statement,
};
use planboard_core::season::SeasonWindow;
use planboard_db::{WarehouseError, WarehouseRepository};
use planboard_shared::BrandCode;
use tracing::warn;

/// Sales facts covering both the window and its prior year.
async fn sales_span(
    repo: &WarehouseRepository,
    brand: &BrandCode,
    window: &SeasonWindow,
) -> Result<Vec<SalesFact>, WarehouseError> {
    repo.sales_facts(brand, window.prior_year().earliest_month(), window.period_end)
        .await
}

/// Sales by channel with YoY.
pub async fn sales_report(
    repo: &WarehouseRepository,
    brand: &BrandCode,
    window: &SeasonWindow,
    measure: SalesMeasure,
) -> Result<ChannelSalesReport, WarehouseError> {
    let facts = sales_span(repo, brand, window).await?;
    Ok(aggregate_sales(&facts, &facts, window, measure))
}

/// VAT-excluded revenue and shipping price by channel.
pub async fn vat_excluded_report(
    repo: &WarehouseRepository,
    brand: &BrandCode,
    window: &SeasonWindow,
) -> Result<VatExcludedReport, WarehouseError> {
    let facts = repo
        .sales_facts(brand, window.earliest_month(), window.period_end)
        .await?;
    Ok(aggregate_vat_excluded(&facts, window))
}

/// Current-season apparel order amount and sell-through.
pub async fn order_amount_report(
    repo: &WarehouseRepository,
    brand: &BrandCode,
    window: &SeasonWindow,
) -> Result<OrderAmount, WarehouseError> {
    let (stock, sales) = tokio::try_join!(
        repo.stock_facts(brand, window.period_end),
        repo.sales_facts(brand, window.current_season_start, window.period_end),
    )?;
    Ok(aggregate_order_amount(&stock, &sales, window))
}

async fn stock_pair(
    repo: &WarehouseRepository,
    brand: &BrandCode,
    window: &SeasonWindow,
) -> Result<(Vec<StockFact>, Vec<StockFact>), WarehouseError> {
    tokio::try_join!(
        repo.stock_facts(brand, window.period_end),
        repo.stock_facts(brand, window.prior_year().period_end),
    )
}

/// End-of-season stock with YoY.
pub async fn end_stock_report(
    repo: &WarehouseRepository,
    brand: &BrandCode,
    window: &SeasonWindow,
) -> Result<EndStockReport, WarehouseError> {
    let (cy, py) = stock_pair(repo, brand, window).await?;
    Ok(aggregate_end_stock(&cy, &py, window))
}

/// COGS and inventory revaluation. The two statements run concurrently.
pub async fn cost_of_sales_report(
    repo: &WarehouseRepository,
    brand: &BrandCode,
    window: &SeasonWindow,
) -> Result<CostOfSales, WarehouseError> {
    let (facts, valuation) = tokio::try_join!(
        repo.cogs_facts(brand, window.earliest_month(), window.period_end),
        repo.valuation_totals(
            brand,
            window.period_start,
            window.period_end,
            valuation_exclusion(brand),
        ),
    )?;
    Ok(aggregate_cost_of_sales(&facts, valuation, window))
}

/// Direct costs by channel code and by channel.
pub async fn direct_cost_report(
    repo: &WarehouseRepository,
    brand: &BrandCode,
    window: &SeasonWindow,
) -> Result<DirectCostReport, WarehouseError> {
    let facts = repo
        .direct_cost_facts(brand, window.earliest_month(), window.period_end)
        .await?;
    Ok(aggregate_direct_cost(&facts, window))
}

/// Operating expense by item for the window and its prior year.
pub async fn operating_expense_report(
    repo: &WarehouseRepository,
    brand: &BrandCode,
    window: &SeasonWindow,
) -> Result<OperatingExpenseReport, WarehouseError> {
    let facts = repo
        .expense_facts(brand, window.prior_year().period_start, window.period_end)
        .await?;
    Ok(aggregate_operating_expense(&facts, window))
}

// ============================================================================
// Season summary
// ============================================================================

/// Every report total for one season plus the derived statement.
#[derive(Debug, Clone)]
pub struct SeasonSummary {
    /// Window the summary covers.
    pub window: SeasonWindow,
    /// Inputs the statement was derived from.
    pub inputs: PnlInputs,
    /// Derived statement.
    pub statement: PnlStatement,
}

fn settled<T>(
    result: Result<T, WarehouseError>,
    report: &'static str,
    window: &SeasonWindow,
) -> Option<T> {
    result
        .inspect_err(|e| warn!(error = %e, report, season = %window.season, "Report unavailable"))
        .ok()
}

/// Runs every aggregator for a season and derives its statement.
///
/// Warehouse failures are logged and leave the affected inputs empty so the
/// statement degrades instead of failing.
pub async fn season_summary(
    repo: &WarehouseRepository,
    brand: &BrandCode,
    window: SeasonWindow,
) -> SeasonSummary {
    let w = &window;
    let (sales, stock, cogs, direct, expense) = tokio::join!(
        sales_span(repo, brand, w),
        stock_pair(repo, brand, w),
        cost_of_sales_report(repo, brand, w),
        direct_cost_report(repo, brand, w),
        operating_expense_report(repo, brand, w),
    );

    let sales = settled(sales, "sales", w);
    let stock = settled(stock, "end-stock", w);

    let tag = sales
        .as_ref()
        .map(|facts| aggregate_sales(facts, facts, w, SalesMeasure::Tag));
    let actual = sales
        .as_ref()
        .map(|facts| aggregate_sales(facts, facts, w, SalesMeasure::Actual));
    let vat = sales.as_ref().map(|facts| aggregate_vat_excluded(facts, w));
    let end_stock = stock
        .as_ref()
        .map(|(cy, py)| aggregate_end_stock(cy, py, w));
    let order = stock
        .as_ref()
        .zip(sales.as_ref())
        .map(|((cy, _), facts)| aggregate_order_amount(cy, facts, w));

    let inputs = PnlInputs {
        end_stock: end_stock.as_ref().map(EndStockReport::total),
        order_amount: order.as_ref().map(|o| o.order_amt),
        sales_rate: order.as_ref().and_then(|o| o.sales_rate),
        sales_tag: tag.as_ref().map(|r| r.total),
        actual_sales: actual.as_ref().map(|r| r.total),
        retail_actual_sales: actual.as_ref().map(|r| r.retail_total),
        vat_excluded_sales: vat.as_ref().map(|r| r.total_vat_excluded),
        shipping_price: vat.as_ref().map(|r| r.shipping_total),
        cost_of_sales: settled(cogs, "cost-of-sales", w),
        direct_cost: settled(direct, "direct-cost", w).as_ref().map(DirectCostSummary::from),
        operating_expense: settled(expense, "operating-expense", w)
            .as_ref()
            .map(OperatingExpenseSummary::from),
    };
    let statement = derive_statement(&inputs, royalty_basis(brand));

    SeasonSummary {
        window,
        inputs,
        statement,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use planboard_core::pnl::PnlLine;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Value};

    use super::*;

    fn window(raw: &str) -> SeasonWindow {
        SeasonWindow::parse(raw).unwrap()
    }

    fn brand() -> BrandCode {
        BrandCode::parse("X").unwrap()
    }

    fn sales_row(month: &str, tag: Value, actual: Value) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("pst_yyyymm", Value::from(month)),
            ("chnl_cd", "1".into()),
            ("mgmt_chnl_cd", "1".into()),
            ("mgmt_chnl_nm", "백화점".into()),
            ("prdt_hrrc1_nm", "ACC".into()),
            ("prdt_hrrc2_nm", "Headwear".into()),
            ("sesn", "23N".into()),
            ("start_yyyymm", Value::String(None)),
            ("end_yyyymm", Value::String(None)),
            ("tag_sale_amt", tag),
            ("act_sale_amt", actual),
            ("vat_exc_sale_amt", dec!(60_000_000).into()),
        ])
    }

    #[tokio::test]
    async fn test_sales_report_reads_prior_year_from_one_fetch() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                sales_row("202304", dec!(100_000_000).into(), dec!(80_000_000).into()),
                sales_row("202204", dec!(50_000_000).into(), dec!(40_000_000).into()),
            ]])
            .into_connection();
        let repo = WarehouseRepository::new(db);

        let report = sales_report(&repo, &brand(), &window("23S"), SalesMeasure::Tag)
            .await
            .unwrap();
        assert_eq!(report.total, dec!(100));
        assert_eq!(report.total_py, dec!(50));
        assert_eq!(report.total_yoy, Some(dec!(200)));
    }

    #[tokio::test]
    async fn test_summary_degrades_failed_reports() {
        // Statements run concurrently, so every one fails the same way.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([
                DbErr::Custom("down".into()),
                DbErr::Custom("down".into()),
                DbErr::Custom("down".into()),
                DbErr::Custom("down".into()),
                DbErr::Custom("down".into()),
                DbErr::Custom("down".into()),
                DbErr::Custom("down".into()),
            ])
            .into_connection();
        let repo = WarehouseRepository::new(db);

        let summary = season_summary(&repo, &brand(), window("23S")).await;
        assert_eq!(summary.inputs, PnlInputs::default());
        assert_eq!(summary.statement.amount(PnlLine::GrossProfit), None);
        assert_eq!(summary.statement.amount(PnlLine::OperatingProfit), None);
        assert_eq!(summary.window.season.to_string(), "23S");
    }
}
