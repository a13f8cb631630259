//! Subnet calculator example
//!
//! Run with: cargo run -p sretools-cidr --example subnet_report

use sretools_cidr::{compute_subnet, find_containing_range, parse_cidr, IpRangeEntry};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("SRE Tools - Subnet Calculator Example\n");

    let info = compute_subnet(&parse_cidr("10.0.16.0/22")?);

    println!("CIDR: {}", info.cidr);
    println!("─────────────────────────────");
    println!("Network:       {}", info.network);
    println!("Broadcast:     {}", info.broadcast);
    println!("Subnet mask:   {}", info.subnet_mask);
    if let (Some(first), Some(last)) = (info.first_usable, info.last_usable) {
        println!("First usable:  {}", first);
        println!("Last usable:   {}", last);
    }
    println!("Total IPs:     {}", info.total_hosts);
    println!("Usable hosts:  {}", info.usable_hosts);

    let ranges = vec![
        IpRangeEntry::new(parse_cidr("52.95.110.0/23")?, "us-east-1", "EC2"),
        IpRangeEntry::new(parse_cidr("3.5.140.0/22")?, "ap-northeast-2", "S3"),
    ];

    println!("\nChecking range membership:");
    for ip in ["52.95.110.1", "3.5.141.9", "1.2.3.4"] {
        match find_containing_range(ip.parse()?, &ranges) {
            Some(entry) => println!(
                "  {:<14} {} ({}, {})",
                ip, entry.block, entry.region, entry.service
            ),
            None => println!("  {:<14} not found", ip),
        }
    }

    Ok(())
}
