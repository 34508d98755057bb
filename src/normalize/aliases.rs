use crate::types::CanonicalField;

/// Source keys accepted for each canonical field, highest priority first
pub static ALIAS_TABLE: [(CanonicalField, &[&str]); 16] = [
    (CanonicalField::DocumentDate, &["documentDate", "docDate", "date"]),
    (CanonicalField::RecordingDate, &["recordingDate", "saleRecDate"]),
    (CanonicalField::RecordType, &["recordType", "doctype", "docType", "type"]),
    (CanonicalField::SalePrice, &["saleAmount", "salePrice", "price", "saleAmt"]),
    (CanonicalField::DeedType, &["deedType"]),
    (CanonicalField::LoanAmount, &["loanAmount", "amountLoan", "loanAmt", "amount"]),
    (CanonicalField::LoanType, &["loanType", "loanTypeCode"]),
    (CanonicalField::LienType, &["lienType"]),
    (CanonicalField::InterestRate, &["interestRate", "rate"]),
    (CanonicalField::LoanTerm, &["loanTerm", "term"]),
    (CanonicalField::LoanToValue, &["loanToValue", "ltv"]),
    (
        CanonicalField::DocNumber,
        &["docNumber", "documentNumber", "trustDeedDocumentNumber"],
    ),
    (
        CanonicalField::LenderName,
        &[
            "lender",
            "lender1",
            "lenderName",
            "lenderName1",
            "lenderLastName",
            "beneficiary",
        ],
    ),
    (CanonicalField::BuyerName, &["buyerName"]),
    (CanonicalField::SellerName, &["sellerName"]),
    (
        CanonicalField::SaleDate,
        &["saleDate", "saleTransDate", "contractDate", "date"],
    ),
];

pub fn aliases_for(field: CanonicalField) -> &'static [&'static str] {
    ALIAS_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == field)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}
