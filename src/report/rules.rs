use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Columns the transaction export must always carry. The check is a
/// subset check: extra columns are allowed and order is not enforced.
pub const EXPECTED_COLUMNS: [&str; 18] = [
    "Data da cobranca",
    "Data da Captura/Pagamento",
    "Status da cobranca",
    "ID da cobranca",
    "ID definido pela Loja",
    "Nome da loja",
    "Código da Loja",
    "ID do estabelecimento",
    "Nome do cliente",
    "Documento do cliente",
    "TID",
    "NSU",
    "Status da transação",
    "Meio de captura",
    "Tipo de venda",
    "Valor total da cobrança",
    "Valor da transação",
    "Número de parcelas",
];

/// Header of the charge-status column.
pub const STATUS_COLUMN: &str = "Status da cobranca";

/// Closed vocabulary for the charge-status column.
pub static VALID_STATUSES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Pendente",
        "Paga",
        "Cancelada",
        "Estornada",
        "Negada",
        "Expirada",
        "Em processamento",
        "Autorizada",
        "Não Autorizada",
        "Tempo expirado",
    ]
    .into_iter()
    .collect()
});

/// Accepted date renderings: `DD/MM/YYYY HH:MM:SS`, then `DD/MM/YYYY`.
/// The timestamped form is always attempted first.
pub const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// True if `value` parses as a real calendar date under one of the two
/// accepted formats.
pub fn is_valid_date(value: &str) -> bool {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).is_ok()
        || NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_date_formats() {
        assert!(is_valid_date("01/01/2024"));
        assert!(is_valid_date("01/01/2024 10:30:00"));
        assert!(is_valid_date("31/12/2023 23:59:59"));
    }

    #[test]
    fn rejects_wrong_format_and_impossible_dates() {
        assert!(!is_valid_date("2024-01-01"));
        assert!(!is_valid_date("32/13/2024"));
        assert!(!is_valid_date("29/02/2023"));
        assert!(!is_valid_date("01/01/2024 25:00:00"));
        assert!(!is_valid_date("01/01/2024 10:30"));
    }

    #[test]
    fn status_vocabulary_is_closed() {
        assert!(VALID_STATUSES.contains("Paga"));
        assert!(VALID_STATUSES.contains("Não Autorizada"));
        assert!(!VALID_STATUSES.contains("paga"));
        assert!(!VALID_STATUSES.contains("Desconhecido"));
    }
}
