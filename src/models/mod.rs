mod category;
mod expense;
mod month;

pub(crate) use category::Category;
pub(crate) use expense::Expense;
pub(crate) use month::MonthKey;

#[cfg(test)]
mod tests;
