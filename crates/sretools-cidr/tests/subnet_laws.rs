use sretools_cidr::{
    compute_subnet, find_containing_range, parse_cidr, CidrBlock, IpRangeEntry, Ipv4Address,
    ParseError, SubnetKind,
};
use sretools_core::{format_address, parse_address};

const SAMPLE_ADDRESSES: [u32; 10] = [
    0x0000_0000,
    0x0000_0001,
    0x0A00_1000, // 10.0.16.0
    0x7FFF_FFFF,
    0x8000_0000,
    0xAC10_FE01, // 172.16.254.1
    0xC0A8_0101, // 192.168.1.1
    0x345F_6E01, // 52.95.110.1
    0xFFFF_FFFE,
    0xFFFF_FFFF,
];

fn block(addr: u32, prefix_len: u8) -> CidrBlock {
    CidrBlock::new(Ipv4Address(addr), prefix_len).unwrap()
}

#[test]
fn test_round_trip_law() {
    for value in SAMPLE_ADDRESSES {
        let addr = Ipv4Address(value);
        assert_eq!(parse_address(&format_address(addr)).unwrap(), addr);
    }

    // Non-canonical input normalizes
    let addr = parse_address("192.168.001.010").unwrap();
    assert_eq!(format_address(addr), "192.168.1.10");
}

#[test]
fn test_mask_monotonicity() {
    for value in SAMPLE_ADDRESSES {
        let mut previous = compute_subnet(&block(value, 0));
        for prefix_len in 1..=32 {
            let current = compute_subnet(&block(value, prefix_len));
            assert!(
                current.network >= previous.network,
                "network shrank at /{} for {}",
                prefix_len,
                Ipv4Address(value)
            );
            let previous_span = previous.broadcast.to_u32() - previous.network.to_u32();
            let current_span = current.broadcast.to_u32() - current.network.to_u32();
            assert!(current_span <= previous_span);
            previous = current;
        }
    }
}

#[test]
fn test_total_hosts_law() {
    for value in SAMPLE_ADDRESSES {
        for prefix_len in 0..=32u8 {
            let info = compute_subnet(&block(value, prefix_len));
            let span = u64::from(info.broadcast.to_u32()) - u64::from(info.network.to_u32()) + 1;
            assert_eq!(span, info.total_hosts);
            assert_eq!(info.total_hosts, 1u64 << (32 - u32::from(prefix_len)));
            assert!(info.network <= info.broadcast);
        }
    }
}

#[test]
fn test_usable_hosts_convention() {
    for value in SAMPLE_ADDRESSES {
        for prefix_len in 0..=32u8 {
            let info = compute_subnet(&block(value, prefix_len));
            match prefix_len {
                32 => {
                    assert_eq!(info.kind, SubnetKind::HostRoute);
                    assert_eq!(info.usable_hosts, 0);
                    assert!(info.first_usable.is_none() && info.last_usable.is_none());
                }
                31 => {
                    assert_eq!(info.kind, SubnetKind::PointToPoint);
                    assert_eq!(info.usable_hosts, 2);
                    assert!(info.first_usable.is_none() && info.last_usable.is_none());
                }
                _ => {
                    assert_eq!(info.kind, SubnetKind::Standard);
                    assert_eq!(info.usable_hosts, info.total_hosts - 2);
                    assert_eq!(
                        info.first_usable.unwrap().to_u32(),
                        info.network.to_u32() + 1
                    );
                    assert_eq!(
                        info.last_usable.unwrap().to_u32(),
                        info.broadcast.to_u32() - 1
                    );
                }
            }
        }
    }
}

#[test]
fn test_containment_law() {
    let entry = IpRangeEntry::new(parse_cidr("52.95.110.0/23").unwrap(), "us-east-1", "EC2");
    let info = compute_subnet(&entry.block);
    let ranges = vec![entry.clone()];

    let low = info.network.to_u32();
    let high = info.broadcast.to_u32();
    let probes = [
        low - 1,
        low,
        low + 1,
        low + 255,
        low + 256,
        high - 1,
        high,
        high + 1,
    ];

    for probe in probes {
        let target = Ipv4Address(probe);
        let inside = low <= probe && probe <= high;
        assert_eq!(
            find_containing_range(target, &ranges).is_some(),
            inside,
            "probe {}",
            target
        );
    }
}

#[test]
fn test_boundary_prefix_0() {
    let info = compute_subnet(&parse_cidr("10.20.30.40/0").unwrap());
    assert_eq!(info.network.to_string(), "0.0.0.0");
    assert_eq!(info.broadcast.to_string(), "255.255.255.255");
    assert_eq!(info.total_hosts, 4294967296);
}

#[test]
fn test_boundary_prefix_32() {
    for value in SAMPLE_ADDRESSES {
        let info = compute_subnet(&block(value, 32));
        assert_eq!(info.network, Ipv4Address(value));
        assert_eq!(info.broadcast, Ipv4Address(value));
        assert_eq!(info.total_hosts, 1);
    }
}

#[test]
fn test_scenario_slash_24() {
    let info = compute_subnet(&parse_cidr("192.168.1.0/24").unwrap());
    assert_eq!(info.network.to_string(), "192.168.1.0");
    assert_eq!(info.broadcast.to_string(), "192.168.1.255");
    assert_eq!(info.subnet_mask.to_string(), "255.255.255.0");
    assert_eq!(info.first_usable.unwrap().to_string(), "192.168.1.1");
    assert_eq!(info.last_usable.unwrap().to_string(), "192.168.1.254");
    assert_eq!(info.total_hosts, 256);
    assert_eq!(info.usable_hosts, 254);
}

#[test]
fn test_scenario_slash_22() {
    let info = compute_subnet(&parse_cidr("10.0.16.0/22").unwrap());
    assert_eq!(info.network.to_string(), "10.0.16.0");
    assert_eq!(info.broadcast.to_string(), "10.0.19.255");
    assert_eq!(info.total_hosts, 1024);
    assert_eq!(info.usable_hosts, 1022);
}

#[test]
fn test_scenario_host_route() {
    let info = compute_subnet(&parse_cidr("8.8.8.8/32").unwrap());
    assert_eq!(info.network.to_string(), "8.8.8.8");
    assert_eq!(info.broadcast.to_string(), "8.8.8.8");
    assert_eq!(info.total_hosts, 1);
    assert!(info.first_usable.is_none());
    assert!(info.last_usable.is_none());
}

#[test]
fn test_scenario_invalid_octet() {
    assert!(matches!(
        parse_cidr("300.1.1.1/24"),
        Err(ParseError::InvalidOctet(_))
    ));
}

#[test]
fn test_scenario_aws_lookup() {
    let ranges = vec![IpRangeEntry::new(
        parse_cidr("52.95.110.0/23").unwrap(),
        "us-east-1",
        "EC2",
    )];

    let hit = find_containing_range(parse_address("52.95.110.1").unwrap(), &ranges);
    assert_eq!(hit, Some(&ranges[0]));

    let miss = find_containing_range(parse_address("1.2.3.4").unwrap(), &ranges);
    assert!(miss.is_none());
}
