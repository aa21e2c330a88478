//! Read-only reports aggregated in memory from the repositories.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use entity::{
    item::ItemStatus,
    loan::LoanStatus,
    transaction::{TransactionStatus, TransactionType},
};
use sea_orm::{ActiveEnum, DatabaseConnection};

use crate::{
    model::{
        api::{CountAmountDto, MonthCountDto},
        report::{
            BranchTotalDto, CustomerReportDto, DailyAmountDto, DailyCountAmountDto,
            DailyCountDto, DashboardDto, InventoryReportDto, LoanReportDto, SalesReportDto,
            TopItemDto,
        },
    },
    server::{
        data::{
            application::ApplicationRepository, branch::BranchRepository,
            customer::CustomerRepository, item::ItemRepository, loan::LoanRepository,
            transaction::TransactionRepository,
        },
        error::AppError,
        model::{
            branch::Branch,
            customer::Customer,
            item::{Item, ItemFilter},
            loan::{Loan, LoanFilter},
            transaction::{Transaction, TransactionFilter},
        },
        service::{customer::rank_customers, loan::interest_earned},
        util::{
            export::{format_cents, write_csv},
            time::{last_days, last_months, month_key, same_month, today},
        },
    },
};

pub const DEFAULT_RANGE_DAYS: i64 = 30;
pub const MAX_DASHBOARD_DAYS: i64 = 365;

const TOP_ENTRIES: usize = 10;
const MISSING: &str = "N/A";

const SALES_HEADERS: [&str; 8] = [
    "Transaction ID",
    "Transaction Number",
    "Date",
    "Amount",
    "Branch",
    "Customer",
    "Item",
    "Category",
];

const LOAN_HEADERS: [&str; 12] = [
    "Loan ID",
    "Loan Code",
    "Created Date",
    "Start Date",
    "Due Date",
    "Loan Amount",
    "Interest Rate (%)",
    "Status",
    "Branch",
    "Customer",
    "Item",
    "Category",
];

/// Inclusive date range with an optional branch restriction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub branch_id: Option<i32>,
}

impl ReportRange {
    /// Fills in the default window: `end_date` today, `start_date` thirty days earlier.
    pub fn resolve(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        branch_id: Option<i32>,
    ) -> Result<Self, AppError> {
        let end_date = end_date.unwrap_or_else(today);
        let start_date = start_date.unwrap_or_else(|| {
            end_date
                .checked_sub_signed(Duration::days(DEFAULT_RANGE_DAYS))
                .unwrap_or(NaiveDate::MIN)
        });

        if start_date > end_date {
            return Err(AppError::BadRequest(
                "start_date must not be after end_date".to_string(),
            ));
        }

        Ok(Self {
            start_date,
            end_date,
            branch_id,
        })
    }

    fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// A CSV download: file name and document body.
pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

pub struct ReportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Headline figures plus daily revenue and new-loan series over the last `days` days.
    pub async fn dashboard(&self, days: i64) -> Result<DashboardDto, AppError> {
        if !(1..=MAX_DASHBOARD_DAYS).contains(&days) {
            return Err(AppError::BadRequest(format!(
                "Days must be between 1 and {}",
                MAX_DASHBOARD_DAYS
            )));
        }

        let today = today();
        let loans = self.all_loans().await?;
        let transactions = self.completed_transactions().await?;
        let items = ItemRepository::new(self.db)
            .get_all(&ItemFilter::default())
            .await?;
        let customers = CustomerRepository::new(self.db).get_all().await?;

        let sales: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.transaction_type == TransactionType::Sale)
            .collect();

        let window = last_days(today, days);
        let revenue_by_day = window
            .iter()
            .map(|day| DailyAmountDto {
                date: *day,
                amount: transactions
                    .iter()
                    .filter(|t| t.transaction_date.date_naive() == *day)
                    .map(|t| t.amount)
                    .sum(),
            })
            .collect();
        let loan_applications_by_day = window
            .iter()
            .map(|day| DailyCountDto {
                date: *day,
                count: loans
                    .iter()
                    .filter(|l| l.created_at.date_naive() == *day)
                    .count() as u64,
            })
            .collect();

        let count_status = |status: LoanStatus| {
            loans.iter().filter(|l| l.status == status).count() as u64
        };

        Ok(DashboardDto {
            total_loans: loans.len() as u64,
            active_loans: count_status(LoanStatus::Active),
            overdue_loans: loans.iter().filter(|l| l.is_overdue(today)).count() as u64,
            defaulted_loans: count_status(LoanStatus::Defaulted),
            total_loan_amount: loans.iter().map(|l| l.loan_amount).sum(),
            total_interest_earned: interest_earned(&loans),
            total_sales: sales.iter().map(|t| t.amount).sum(),
            sales_today: sales
                .iter()
                .filter(|t| t.transaction_date.date_naive() == today)
                .map(|t| t.amount)
                .sum(),
            total_inventory_value: items
                .iter()
                .filter(|i| held_in_stock(i.status))
                .map(|i| i.appraisal_value)
                .sum(),
            total_customers: customers.len() as u64,
            new_customers_this_month: customers
                .iter()
                .filter(|c| same_month(c.created_at, today))
                .count() as u64,
            revenue_by_day,
            loan_applications_by_day,
        })
    }

    /// Completed sales within the range.
    pub async fn sales(&self, range: ReportRange) -> Result<SalesReportDto, AppError> {
        let sales = self.sales_in(&range).await?;
        let branches = self.branch_names().await?;
        let items = self.items_by_id().await?;

        let total_sales: i64 = sales.iter().map(|t| t.amount).sum();
        let average_sale = if sales.is_empty() {
            0.0
        } else {
            total_sales as f64 / sales.len() as f64
        };

        let mut by_date: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        let mut sales_by_payment_method: BTreeMap<String, CountAmountDto> = BTreeMap::new();
        let mut by_branch: BTreeMap<i32, CountAmountDto> = BTreeMap::new();
        let mut by_item: HashMap<i32, i64> = HashMap::new();

        for sale in &sales {
            *by_date.entry(sale.transaction_date.date_naive()).or_default() += sale.amount;
            add(
                sales_by_payment_method
                    .entry(sale.payment_method.to_value())
                    .or_default(),
                sale.amount,
            );
            add(by_branch.entry(sale.branch_id).or_default(), sale.amount);
            if let Some(item_id) = sale.item_id {
                *by_item.entry(item_id).or_default() += sale.amount;
            }
        }

        let mut top_items: Vec<TopItemDto> = by_item
            .into_iter()
            .filter_map(|(item_id, amount)| {
                let item = items.get(&item_id)?;
                Some(TopItemDto {
                    item_id,
                    item_name: item.name.clone(),
                    category: item.category.to_value(),
                    amount,
                })
            })
            .collect();
        top_items.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.item_id.cmp(&b.item_id)));
        top_items.truncate(TOP_ENTRIES);

        Ok(SalesReportDto {
            start_date: range.start_date,
            end_date: range.end_date,
            total_sales,
            transaction_count: sales.len() as u64,
            average_sale,
            sales_by_date: by_date
                .into_iter()
                .map(|(date, amount)| DailyAmountDto { date, amount })
                .collect(),
            sales_by_payment_method,
            sales_by_branch: branch_totals(by_branch, &branches),
            top_items,
        })
    }

    /// Loans created within the range. A loan belongs to the branch holding its item.
    pub async fn loans(&self, range: ReportRange) -> Result<LoanReportDto, AppError> {
        let items = self.items_by_id().await?;
        let branches = self.branch_names().await?;
        let loans = self.loans_in(&range, &items).await?;

        let total_amount: i64 = loans.iter().map(|l| l.loan_amount).sum();
        let total_paid: i64 = loans.iter().map(|l| l.total_paid).sum();

        let mut by_status: BTreeMap<String, CountAmountDto> = BTreeMap::new();
        let mut by_date: BTreeMap<NaiveDate, CountAmountDto> = BTreeMap::new();
        let mut by_branch: BTreeMap<i32, CountAmountDto> = BTreeMap::new();

        for loan in &loans {
            add(by_status.entry(loan.status.to_value()).or_default(), loan.loan_amount);
            add(
                by_date.entry(loan.created_at.date_naive()).or_default(),
                loan.loan_amount,
            );
            if let Some(item) = items.get(&loan.item_id) {
                add(by_branch.entry(item.branch_id).or_default(), loan.loan_amount);
            }
        }

        let (average_loan_amount, average_term_days) = if loans.is_empty() {
            (0.0, 0.0)
        } else {
            let count = loans.len() as f64;
            let total_term: i64 = loans.iter().map(|l| l.term_days as i64).sum();
            (total_amount as f64 / count, total_term as f64 / count)
        };

        Ok(LoanReportDto {
            start_date: range.start_date,
            end_date: range.end_date,
            total_loans: loans.len() as u64,
            total_amount,
            by_status,
            interest_collected: (total_paid - total_amount).max(0),
            loans_by_date: by_date
                .into_iter()
                .map(|(date, totals)| DailyCountAmountDto {
                    date,
                    count: totals.count,
                    amount: totals.amount,
                })
                .collect(),
            loans_by_branch: branch_totals(by_branch, &branches),
            average_loan_amount,
            average_term_days,
        })
    }

    pub async fn inventory(&self, branch_id: Option<i32>) -> Result<InventoryReportDto, AppError> {
        let filter = ItemFilter {
            branch_id,
            ..Default::default()
        };
        let items = ItemRepository::new(self.db).get_all(&filter).await?;
        let branches = self.branch_names().await?;

        let mut by_status: BTreeMap<String, CountAmountDto> = BTreeMap::new();
        let mut by_category: BTreeMap<String, CountAmountDto> = BTreeMap::new();
        let mut by_branch: BTreeMap<i32, CountAmountDto> = BTreeMap::new();

        for item in &items {
            add(by_status.entry(item.status.to_value()).or_default(), item.appraisal_value);
            add(
                by_category.entry(item.category.to_value()).or_default(),
                item.appraisal_value,
            );
            add(by_branch.entry(item.branch_id).or_default(), item.appraisal_value);
        }

        let mut recent_items = items.clone();
        recent_items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        recent_items.truncate(TOP_ENTRIES);

        let mut highest_value_items = items.clone();
        highest_value_items.sort_by(|a, b| b.appraisal_value.cmp(&a.appraisal_value));
        highest_value_items.truncate(TOP_ENTRIES);

        Ok(InventoryReportDto {
            total_items: items.len() as u64,
            total_value: items.iter().map(|i| i.appraisal_value).sum(),
            by_status,
            by_category,
            by_branch: branch_totals(by_branch, &branches),
            recent_items: recent_items.into_iter().map(Item::into_dto).collect(),
            highest_value_items: highest_value_items
                .into_iter()
                .map(Item::into_dto)
                .collect(),
        })
    }

    pub async fn customers(&self) -> Result<CustomerReportDto, AppError> {
        let today = today();
        let customers = CustomerRepository::new(self.db).get_all().await?;
        let loans = self.all_loans().await?;

        let active = customers.iter().filter(|c| c.is_active).count() as u64;
        let cutoff = today - Duration::days(DEFAULT_RANGE_DAYS);

        let mut top_by_loan_amount = rank_customers(&customers, &loans);
        top_by_loan_amount.sort_by(|a, b| b.total_loan_amount.cmp(&a.total_loan_amount));
        top_by_loan_amount.truncate(TOP_ENTRIES);

        let monthly_acquisition = last_months(today, 12)
            .into_iter()
            .map(|(year, month)| MonthCountDto {
                month: month_key(year, month),
                count: customers
                    .iter()
                    .filter(|c| c.created_at.year() == year && c.created_at.month() == month)
                    .count() as u64,
            })
            .collect();

        Ok(CustomerReportDto {
            total_customers: customers.len() as u64,
            active,
            inactive: customers.len() as u64 - active,
            new_last_30_days: customers
                .iter()
                .filter(|c| c.created_at.date_naive() >= cutoff)
                .count() as u64,
            top_by_loan_amount,
            monthly_acquisition,
        })
    }

    /// Sales in the range as `sales_report_{start}_{end}.csv`, oldest first.
    pub async fn export_sales(&self, range: ReportRange) -> Result<CsvExport, AppError> {
        let mut sales = self.sales_in(&range).await?;
        sales.sort_by(|a, b| a.transaction_date.cmp(&b.transaction_date));

        let branches = self.branch_names().await?;
        let items = self.items_by_id().await?;
        let customers = self.customers_by_id().await?;

        let body = write_csv(
            &SALES_HEADERS,
            sales.iter().map(|sale| {
                let item = sale.item_id.and_then(|id| items.get(&id));
                vec![
                    sale.id.to_string(),
                    sale.transaction_code.clone(),
                    sale.transaction_date.date_naive().to_string(),
                    format_cents(sale.amount),
                    or_missing(branches.get(&sale.branch_id).cloned()),
                    or_missing(
                        sale.customer_id
                            .and_then(|id| customers.get(&id))
                            .map(Customer::full_name),
                    ),
                    or_missing(item.map(|i| i.name.clone())),
                    or_missing(item.map(|i| i.category.to_value())),
                ]
            }),
        )?;

        Ok(CsvExport {
            filename: format!("sales_report_{}_{}.csv", range.start_date, range.end_date),
            body,
        })
    }

    /// Loans created in the range as `loan_report_{start}_{end}.csv`, oldest first.
    pub async fn export_loans(&self, range: ReportRange) -> Result<CsvExport, AppError> {
        let items = self.items_by_id().await?;
        let branches = self.branch_names().await?;
        let customers = self.customers_by_id().await?;

        let mut loans = self.loans_in(&range, &items).await?;
        loans.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let body = write_csv(
            &LOAN_HEADERS,
            loans.iter().map(|loan| {
                let item = items.get(&loan.item_id);
                vec![
                    loan.id.to_string(),
                    loan.loan_code.clone(),
                    loan.created_at.date_naive().to_string(),
                    loan.start_date.to_string(),
                    loan.due_date.to_string(),
                    format_cents(loan.loan_amount),
                    loan.interest_rate.to_string(),
                    loan.status.to_value(),
                    or_missing(item.and_then(|i| branches.get(&i.branch_id).cloned())),
                    or_missing(customers.get(&loan.customer_id).map(Customer::full_name)),
                    or_missing(item.map(|i| i.name.clone())),
                    or_missing(item.map(|i| i.category.to_value())),
                ]
            }),
        )?;

        Ok(CsvExport {
            filename: format!("loan_report_{}_{}.csv", range.start_date, range.end_date),
            body,
        })
    }

    async fn all_loans(&self) -> Result<Vec<Loan>, AppError> {
        Ok(LoanRepository::new(self.db)
            .get_all(&LoanFilter::default(), today())
            .await?)
    }

    async fn loans_in(
        &self,
        range: &ReportRange,
        items: &HashMap<i32, Item>,
    ) -> Result<Vec<Loan>, AppError> {
        Ok(self
            .all_loans()
            .await?
            .into_iter()
            .filter(|loan| range.contains(loan.created_at.date_naive()))
            .filter(|loan| match range.branch_id {
                Some(branch_id) => items
                    .get(&loan.item_id)
                    .is_some_and(|item| item.branch_id == branch_id),
                None => true,
            })
            .collect())
    }

    async fn completed_transactions(&self) -> Result<Vec<Transaction>, AppError> {
        let filter = TransactionFilter {
            status: Some(TransactionStatus::Completed),
            ..Default::default()
        };

        Ok(TransactionRepository::new(self.db).get_all(&filter).await?)
    }

    async fn sales_in(&self, range: &ReportRange) -> Result<Vec<Transaction>, AppError> {
        let filter = TransactionFilter {
            transaction_type: Some(TransactionType::Sale),
            status: Some(TransactionStatus::Completed),
            branch_id: range.branch_id,
            ..Default::default()
        };

        Ok(TransactionRepository::new(self.db)
            .get_all(&filter)
            .await?
            .into_iter()
            .filter(|sale| range.contains(sale.transaction_date.date_naive()))
            .collect())
    }

    async fn branch_names(&self) -> Result<HashMap<i32, String>, AppError> {
        Ok(BranchRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(|branch: Branch| (branch.id, branch.name))
            .collect())
    }

    async fn items_by_id(&self) -> Result<HashMap<i32, Item>, AppError> {
        Ok(ItemRepository::new(self.db)
            .get_all(&ItemFilter::default())
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect())
    }

    async fn customers_by_id(&self) -> Result<HashMap<i32, Customer>, AppError> {
        Ok(CustomerRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(|customer| (customer.id, customer))
            .collect())
    }
}

/// Items the shop physically holds and could sell.
fn held_in_stock(status: ItemStatus) -> bool {
    matches!(
        status,
        ItemStatus::Pawned | ItemStatus::ForSale | ItemStatus::Defaulted
    )
}

fn add(totals: &mut CountAmountDto, amount: i64) {
    totals.count += 1;
    totals.amount += amount;
}

fn branch_totals(
    totals: BTreeMap<i32, CountAmountDto>,
    names: &HashMap<i32, String>,
) -> Vec<BranchTotalDto> {
    totals
        .into_iter()
        .map(|(branch_id, totals)| BranchTotalDto {
            branch_id,
            branch_name: names
                .get(&branch_id)
                .cloned()
                .unwrap_or_else(|| MISSING.to_string()),
            count: totals.count,
            amount: totals.amount,
        })
        .collect()
}

fn or_missing(value: Option<String>) -> String {
    value.unwrap_or_else(|| MISSING.to_string())
}
