use crate::error::Result;

/// Concatenate the first page with the outcomes of the remaining pages
///
/// Outcomes are appended in the order given, which must be page order. The first
/// error in that order is returned and every record is dropped: there is no partial
/// result.
pub fn merge<R>(first_page: Vec<R>, outcomes: Vec<Result<Vec<R>>>) -> Result<Vec<R>> {
    let mut records = first_page;
    for outcome in outcomes {
        records.extend(outcome?);
    }
    Ok(records)
}
