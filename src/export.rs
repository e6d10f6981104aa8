use chrono::SecondsFormat;
use csv::WriterBuilder;

use crate::entities::donation;
use crate::error::AppError;

pub const CSV_HEADER: [&str; 8] = [
    "id",
    "amount",
    "numbers",
    "method",
    "donor_name",
    "donor_phone",
    "donor_address",
    "created_at",
];

/// Render donations as CSV with a header row, one record per donation, in
/// the order given. Numbers are space-separated inside their column.
pub fn donations_to_csv(donations: &[donation::Model]) -> Result<String, AppError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for d in donations {
        let numbers: Vec<String> = d.number_list().iter().map(|n| n.to_string()).collect();
        writer.write_record([
            d.id.to_string(),
            d.amount.to_string(),
            numbers.join(" "),
            d.method.clone(),
            d.donor_name.clone(),
            d.donor_phone.clone(),
            d.donor_address.clone(),
            d.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::SerializationError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_header_only_when_empty() {
        let csv = donations_to_csv(&[]).unwrap();
        assert_eq!(
            csv,
            "id,amount,numbers,method,donor_name,donor_phone,donor_address,created_at\n"
        );
    }

    #[test]
    fn test_row_order_and_quoting() {
        let donation = donation::Model {
            id: 12,
            amount: 10,
            numbers: json!([3, 7]),
            method: "venmo".to_string(),
            donor_name: "Doe, Jane".to_string(),
            donor_phone: "555-0100".to_string(),
            donor_address: "1 Main St".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap(),
        };

        let csv = donations_to_csv(&[donation]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "12,10,3 7,venmo,\"Doe, Jane\",555-0100,1 Main St,2025-06-01T12:30:00Z"
        );
    }
}
