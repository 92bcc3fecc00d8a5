use crate::engine::period::Period;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodLabels {
    pub period: &'static str,
    pub comparison: &'static str,
}

const DAILY: PeriodLabels = PeriodLabels {
    period: "daily sales",
    comparison: "vs. previous day",
};
const WEEKLY: PeriodLabels = PeriodLabels {
    period: "weekly sales",
    comparison: "vs. previous week",
};
const MONTHLY: PeriodLabels = PeriodLabels {
    period: "monthly sales",
    comparison: "vs. previous month",
};
const YEARLY: PeriodLabels = PeriodLabels {
    period: "yearly sales",
    comparison: "vs. previous year",
};

pub const fn labels_for(period: Period) -> PeriodLabels {
    match period {
        Period::Daily => DAILY,
        Period::Weekly => WEEKLY,
        Period::Monthly => MONTHLY,
        Period::Yearly => YEARLY,
    }
}
