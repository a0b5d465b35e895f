use crate::loader::LoadReport;

const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn banner() -> String {
    format!("{}\nNYC Taxi Data Loader for ClickHouse\n{}", rule(), rule())
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn render(report: &LoadReport) -> String {
    let mut lines = vec![
        format!("Total rows in table: {}", group_thousands(report.row_count)),
        String::new(),
        "Sample data:".to_string(),
    ];
    lines.extend(report.sample.iter().map(|row| row.to_string()));
    lines.push(String::new());
    lines.push(rule());
    lines.push(format!("Total time: {:.2} seconds", report.elapsed.as_secs_f64()));
    lines.push(rule());
    lines.join("\n")
}
