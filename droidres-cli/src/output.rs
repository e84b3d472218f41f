use serde::Serialize;

/// Print `report` as pretty JSON when requested, otherwise run `summary`.
pub fn emit<T: Serialize>(report: &T, json: bool, summary: impl FnOnce(&T)) -> Result<(), String> {
    if json {
        let text = serde_json::to_string_pretty(report)
            .map_err(|e| format!("Failed to serialize report JSON: {}", e))?;
        println!("{}", text);
    } else {
        summary(report);
    }
    Ok(())
}
