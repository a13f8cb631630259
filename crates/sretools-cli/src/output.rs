//! Rendering of tool results
//!
//! Every renderer writes to a caller-supplied writer so the binary can target
//! stdout and tests can target a buffer.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use sretools_cidr::{
    compute_subnet, parse_cidr, IpRangeEntry, Ipv4Address, SubnetInfo, SubnetKind,
};
use sretools_core::{ParseError, Tool};
use std::io::Write;

use crate::batch::BatchResult;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table output
    Human,
    /// JSON output (pretty-printed)
    Json,
    /// JSON output (compact)
    JsonCompact,
    /// CSV output
    Csv,
}

/// Machine-readable form of a validation error
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub kind: &'static str,
    pub message: String,
}

impl From<&ParseError> for ErrorReport {
    fn from(err: &ParseError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Outcome of one subnet calculation
#[derive(Debug, Clone, Serialize)]
pub struct SubnetResult {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<SubnetInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl SubnetResult {
    pub fn from_input(input: &str) -> Self {
        match parse_cidr(input.trim()) {
            Ok(block) => Self {
                input: input.to_string(),
                subnet: Some(compute_subnet(&block)),
                error: None,
            },
            Err(e) => Self {
                input: input.to_string(),
                subnet: None,
                error: Some(ErrorReport::from(&e)),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of an AWS range lookup
#[derive(Debug, Clone, Serialize)]
pub struct AwsLookupResult {
    pub ip: Ipv4Address,
    pub found: bool,
    pub matches: Vec<IpRangeEntry>,
    pub sync_token: String,
    pub create_date: String,
}

#[derive(Debug, Clone, Serialize)]
struct PublicIp {
    ip: Ipv4Address,
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn opt_addr(addr: Option<Ipv4Address>) -> String {
    addr.map_or(String::new(), |a| a.to_string())
}

fn usable_placeholder(kind: SubnetKind) -> &'static str {
    match kind {
        SubnetKind::PointToPoint => "n/a (point-to-point /31)",
        SubnetKind::HostRoute => "n/a (host route /32)",
        SubnetKind::Standard => "n/a",
    }
}

pub fn render_subnets<W: Write>(
    out: &mut W,
    results: &[SubnetResult],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Human => subnets_human(out, results),
        OutputFormat::Json => write_json(out, results, true),
        OutputFormat::JsonCompact => write_json(out, results, false),
        OutputFormat::Csv => subnets_csv(out, results),
    }
}

fn subnets_human<W: Write>(out: &mut W, results: &[SubnetResult]) -> Result<()> {
    for result in results {
        writeln!(out)?;
        writeln!(out, "{}", "CIDR Subnet Calculator".bold().cyan())?;
        writeln!(out, "{}", "─".repeat(50).dimmed())?;
        writeln!(out, "{:>15}: {}", "Input".bold(), result.input)?;

        if let Some(ref err) = result.error {
            writeln!(out, "{:>15}: {}", "Error".bold(), err.message.red())?;
            continue;
        }

        if let Some(ref info) = result.subnet {
            let placeholder = usable_placeholder(info.kind);
            writeln!(out, "{:>15}: {}", "Network".bold(), info.network.to_string().green())?;
            writeln!(out, "{:>15}: {}", "Broadcast".bold(), info.broadcast)?;
            writeln!(out, "{:>15}: {}", "Subnet Mask".bold(), info.subnet_mask)?;
            writeln!(out, "{:>15}: {}", "Wildcard Mask".bold(), info.wildcard_mask)?;
            writeln!(
                out,
                "{:>15}: {}",
                "First Usable".bold(),
                info.first_usable.map_or(placeholder.to_string(), |a| a.to_string())
            )?;
            writeln!(
                out,
                "{:>15}: {}",
                "Last Usable".bold(),
                info.last_usable.map_or(placeholder.to_string(), |a| a.to_string())
            )?;
            writeln!(out, "{:>15}: {}", "Total Hosts".bold(), info.total_hosts)?;
            writeln!(out, "{:>15}: {}", "Usable Hosts".bold(), info.usable_hosts)?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn subnets_csv<W: Write>(out: &mut W, results: &[SubnetResult]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "input",
        "network",
        "broadcast",
        "subnet_mask",
        "wildcard_mask",
        "first_usable",
        "last_usable",
        "total_hosts",
        "usable_hosts",
        "error",
    ])?;
    for result in results {
        match result.subnet {
            Some(ref info) => wtr.write_record([
                result.input.as_str(),
                &info.network.to_string(),
                &info.broadcast.to_string(),
                &info.subnet_mask.to_string(),
                &info.wildcard_mask.to_string(),
                &opt_addr(info.first_usable),
                &opt_addr(info.last_usable),
                &info.total_hosts.to_string(),
                &info.usable_hosts.to_string(),
                "",
            ])?,
            None => wtr.write_record([
                result.input.as_str(),
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                result.error.as_ref().map_or("", |e| e.message.as_str()),
            ])?,
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn render_aws_lookup<W: Write>(
    out: &mut W,
    result: &AwsLookupResult,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Human => aws_lookup_human(out, result),
        OutputFormat::Json => write_json(out, result, true),
        OutputFormat::JsonCompact => write_json(out, result, false),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            wtr.write_record(["ip", "ip_prefix", "region", "service", "network_border_group"])?;
            for entry in &result.matches {
                wtr.write_record([
                    result.ip.to_string().as_str(),
                    &entry.block.to_string(),
                    &entry.region,
                    &entry.service,
                    entry.network_border_group.as_deref().unwrap_or(""),
                ])?;
            }
            wtr.flush()?;
            Ok(())
        }
    }
}

fn aws_lookup_human<W: Write>(out: &mut W, result: &AwsLookupResult) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "AWS IP Lookup".bold().cyan())?;
    writeln!(out, "{}", "─".repeat(50).dimmed())?;
    writeln!(out, "{:>15}: {}", "IP".bold(), result.ip)?;

    if !result.found {
        writeln!(out, "{}", "IP Not Found in AWS Ranges".blue().bold())?;
        writeln!(out, "The IP address is not currently listed in the AWS IP ranges.")?;
    } else {
        writeln!(out, "{}", "IP Found in AWS Ranges".green().bold())?;
        for entry in &result.matches {
            writeln!(out, "{:>15}: {}", "IP Prefix".bold(), entry.block.to_string().green())?;
            writeln!(out, "{:>15}: {}", "Region".bold(), entry.region)?;
            writeln!(out, "{:>15}: {}", "Service".bold(), entry.service)?;
            if let Some(ref group) = entry.network_border_group {
                writeln!(out, "{:>15}: {}", "Border Group".bold(), group)?;
            }
        }
    }

    if !result.sync_token.is_empty() {
        writeln!(
            out,
            "{}",
            format!("ranges {} (sync token {})", result.create_date, result.sync_token).dimmed()
        )?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn render_batch<W: Write>(
    out: &mut W,
    results: &[BatchResult],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for result in results {
                match (&result.matched, &result.error) {
                    (_, Some(err)) => {
                        writeln!(out, "{:<18} {}", result.input, err.message.red())?
                    }
                    (Some(entry), None) => writeln!(
                        out,
                        "{:<18} {:<20} {:<16} {}",
                        result.input,
                        entry.block.to_string().green(),
                        entry.region,
                        entry.service
                    )?,
                    (None, None) => writeln!(out, "{:<18} {}", result.input, "not found".dimmed())?,
                }
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, results, true),
        OutputFormat::JsonCompact => write_json(out, results, false),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            wtr.write_record(["input", "found", "ip_prefix", "region", "service", "error"])?;
            for result in results {
                let entry = result.matched.as_ref();
                wtr.write_record([
                    result.input.as_str(),
                    if entry.is_some() { "true" } else { "false" },
                    &entry.map_or(String::new(), |e| e.block.to_string()),
                    entry.map_or("", |e| e.region.as_str()),
                    entry.map_or("", |e| e.service.as_str()),
                    result.error.as_ref().map_or("", |e| e.message.as_str()),
                ])?;
            }
            wtr.flush()?;
            Ok(())
        }
    }
}

pub fn render_public_ip<W: Write>(
    out: &mut W,
    ip: Ipv4Address,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            writeln!(out)?;
            writeln!(out, "{}", "Your Public IP Address".bold().cyan())?;
            writeln!(out, "{}", "─".repeat(50).dimmed())?;
            writeln!(out, "{:>15}: {}", "IP".bold(), ip.to_string().green())?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Json => write_json(out, &PublicIp { ip }, true),
        OutputFormat::JsonCompact => write_json(out, &PublicIp { ip }, false),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            wtr.write_record(["ip"])?;
            wtr.write_record([ip.to_string()])?;
            wtr.flush()?;
            Ok(())
        }
    }
}

pub fn render_tools<'a, W, I>(out: &mut W, tools: I, format: OutputFormat) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Tool>,
{
    let tools: Vec<&Tool> = tools.into_iter().collect();
    match format {
        OutputFormat::Human => {
            writeln!(out)?;
            writeln!(out, "{}", "SRE Tools".bold().cyan())?;
            writeln!(out, "{}", "─".repeat(50).dimmed())?;
            for tool in tools {
                writeln!(
                    out,
                    "{:<12} {} {}",
                    tool.command.green(),
                    tool.title.bold(),
                    format!("[{}]", tool.category).dimmed()
                )?;
                writeln!(out, "{:<12} {}", "", tool.description)?;
            }
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Json => write_json(out, &tools, true),
        OutputFormat::JsonCompact => write_json(out, &tools, false),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            wtr.write_record(["id", "title", "category", "command", "description"])?;
            for tool in tools {
                wtr.write_record([
                    tool.id,
                    tool.title,
                    tool.category,
                    tool.command,
                    tool.description,
                ])?;
            }
            wtr.flush()?;
            Ok(())
        }
    }
}
