//! Plain-text rendering of reports.

use std::io::{self, Write};

use serde_json::Value;

use crate::application::{AccountReport, PublicKeyReport, TransactionReport, TrustlineReport};
use crate::domain::format_stroops;

const RULE: &str = "-------------------";

pub fn render_account<W: Write>(report: &AccountReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "Account Info")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Account:        {}", report.account)?;
    writeln!(out, "Sequence:       {}", report.sequence)?;
    writeln!(out, "Subentry Count: {}", report.subentry_count)?;
    if let Some(domain) = &report.home_domain {
        writeln!(out, "Home Domain:    {}", domain)?;
    }
    writeln!(out, "{}", RULE)?;

    if report.shows_signers() && !report.signers.is_empty() {
        writeln!(out, "Signers:")?;
        for signer in &report.signers {
            writeln!(out, "  - {} (weight: {})", signer.key, signer.weight)?;
        }
        writeln!(out, "{}", RULE)?;
    }

    writeln!(out, "Balances:")?;
    for balance in &report.balances {
        writeln!(out, "  - {} {}", balance.balance, balance.asset)?;
    }
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "Payment operations (last {} operations): {}",
        crate::application::PAYMENT_WINDOW,
        report.total_payments
    )?;

    if let Some(txs) = report.transactions.as_ref().filter(|t| !t.is_empty()) {
        writeln!(out, "{}", RULE)?;
        writeln!(out, "Last {} Transactions:", txs.len())?;
        for (i, tx) in txs.iter().enumerate() {
            writeln!(out, "  #{}:", i + 1)?;
            writeln!(out, "    Hash:    {}", tx.hash)?;
            writeln!(out, "    Created: {}", tx.created_at.to_rfc3339())?;
            writeln!(out, "    Fee:     {}", describe_fee(tx.fee_charged))?;
            writeln!(out, "    Success: {}", if tx.successful { "yes" } else { "no" })?;
            writeln!(out, "    Memo:    {}", tx.memo.as_deref().unwrap_or("(none)"))?;
        }
    }
    Ok(())
}

pub fn render_transaction<W: Write>(report: &TransactionReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "Transaction Info")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Hash:        {}", report.hash)?;
    writeln!(out, "Ledger:      {}", report.ledger)?;
    writeln!(out, "Created At:  {}", report.created_at.to_rfc3339())?;
    writeln!(out, "Source:      {}", report.source_account)?;
    writeln!(out, "Fee:         {}", describe_fee(report.fee_charged))?;
    writeln!(out, "Memo:        {}", report.memo.as_deref().unwrap_or("(none)"))?;
    writeln!(
        out,
        "Status:      {}",
        if report.successful { "Success" } else { "Failed" }
    )?;
    writeln!(out, "Operations:  {}", report.operation_count)?;
    writeln!(out, "{}", RULE)?;

    for (i, op) in report.operations.iter().enumerate() {
        writeln!(out, "  #{}: [{}]", i + 1, op.op_type)?;
        writeln!(out, "      From: {}", op.source)?;
        for (key, value) in &op.fields {
            writeln!(out, "      {}: {}", field_label(key), display_value(value))?;
        }
    }
    Ok(())
}

pub fn render_trustlines<W: Write>(report: &TrustlineReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "Trustlines Audit ({} on {})", report.account, report.network)?;
    writeln!(out, "{}", RULE)?;
    if report.trustlines.is_empty() {
        writeln!(out, "No non-native trustlines found.")?;
        return Ok(());
    }

    for (i, line) in report.trustlines.iter().enumerate() {
        let mark = if line.zero_balance { "  [zero balance]" } else { "" };
        writeln!(out, "#{}: Asset: {}{}", i + 1, line.asset, mark)?;
        writeln!(out, "    Balance: {}", line.balance)?;
        writeln!(out, "    Limit:   {}", line.limit)?;
    }

    let zero = report.zero_balance_count();
    if zero > 0 {
        writeln!(out, "{}", RULE)?;
        writeln!(out, "{} of {} trustlines have a zero balance", zero, report.trustlines.len())?;
    }
    Ok(())
}

pub fn render_public_key<W: Write>(report: &PublicKeyReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "Public Key: {}", report.public_key)?;
    match report.matches {
        Some(true) => writeln!(out, "Keys match"),
        Some(false) => writeln!(
            out,
            "Keys do not match (expected {})",
            report.expected.as_deref().unwrap_or_default()
        ),
        None => Ok(()),
    }
}

fn describe_fee(stroops: u64) -> String {
    match i64::try_from(stroops) {
        Ok(s) => format!("{} stroops ({} XLM)", stroops, format_stroops(s)),
        Err(_) => format!("{} stroops", stroops),
    }
}

/// "startingBalance" -> "Starting balance"
fn field_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            label.push(' ');
            label.extend(c.to_lowercase());
        } else {
            label.push(c);
        }
    }
    label
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "(none)".to_string(),
        other => other.to_string(),
    }
}
