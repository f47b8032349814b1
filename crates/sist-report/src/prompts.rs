use sist_models::{ReportRequest, REPORT_COLUMNS};

/// Build the analyst instruction for one report request.
///
/// The prompt pins the output contract: a CSV with exactly the four
/// canonical columns, scoped to the requested period, and nothing else.
pub fn report_prompt(request: &ReportRequest) -> String {
    let [first, second, third] = &request.companies;
    let period = request.period.label();
    let columns = REPORT_COLUMNS
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Act as a senior business analyst. Create a competitive report for {first}, {second}, \
         and {third} specifically for the period {period}.\n\n\
         Format the output as a valid CSV with these columns:\n\
         {columns}\n\n\
         Data requirements:\n\
         1. Product Description: detail key products and technology shifts during {period}.\n\
         2. Marketing Strategy: describe brand messaging and competitive pivots in {period}.\n\
         3. Financial Summary: provide revenue and profitability snapshots for the {period} cycle.\n\n\
         Return ONLY the raw CSV data, with no surrounding prose."
    )
}
