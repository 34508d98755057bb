use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Keys that mark an object as a loan or mortgage record
pub static LOAN_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "lender",
        "lender1",
        "lender2",
        "lenderName",
        "lenderName1",
        "lenderName2",
        "loanAmount",
        "amountLoan",
        "loanAmt",
        "loanType",
        "loanToValue",
        "lienType",
        "interestRate",
        "loanTerm",
        "loanDueDate",
        "recordingDate",
        "documentDate",
        "docNumber",
        "loanTypeCode",
        "lenderLastName",
        "beneficiary",
        "date",
        "term",
    ]
    .into_iter()
    .collect()
});

/// Keys that mark an object as a sale or transfer record
pub static SALE_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "saleAmount",
        "salePrice",
        "price",
        "saleAmt",
        "deedType",
        "transferTax",
        "buyerName",
        "sellerName",
        "saleTransDate",
        "saleRecDate",
    ]
    .into_iter()
    .collect()
});

/// Field names whose values are coerced to calendar dates
pub static DATE_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "documentDate",
        "recordingDate",
        "saleDate",
        "saleTransDate",
        "saleRecDate",
        "contractDate",
        "date",
    ]
    .into_iter()
    .collect()
});
