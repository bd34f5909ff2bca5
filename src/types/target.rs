//! Subnet parsing and target enumeration.
//!
//! Only IPv4 `/24` networks are supported. A subnet such as `10.60.3.0/24`
//! expands to the hosts `10.60.3.1` through `10.60.3.254`; the network and
//! broadcast addresses are never probed.

use crate::error::InvalidArgument;
use crate::types::Port;
use ipnetwork::Ipv4Network;
use serde::Serialize;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::str::FromStr;

/// One address and port to probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Target {
    pub addr: Ipv4Addr,
    pub port: Port,
}

impl Target {
    pub const fn new(addr: Ipv4Addr, port: Port) -> Self {
        Self { addr, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.addr, self.port.as_u16()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.addr, self.port)
    }
}

/// A validated IPv4 `/24` network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subnet {
    network: Ipv4Network,
}

impl Subnet {
    /// The only prefix length accepted.
    pub const PREFIX: u8 = 24;

    /// Number of probed hosts per subnet.
    pub const HOSTS: usize = 254;

    /// Parse `A.B.C.x/24`. Each octet is one to three decimal digits with a
    /// value of at most 255. The host octet is accepted but discarded.
    pub fn parse(s: &str) -> Result<Self, InvalidArgument> {
        let invalid = || InvalidArgument::Subnet(s.to_string());

        let (addr, prefix) = s.split_once('/').ok_or_else(invalid)?;
        if prefix != "24" {
            return Err(invalid());
        }

        let mut octets = [0u8; 4];
        let mut parts = addr.split('.');
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *octet = part.parse().map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        let network = Ipv4Network::new(Ipv4Addr::from(octets), Self::PREFIX)
            .and_then(|net| Ipv4Network::new(net.network(), Self::PREFIX))
            .map_err(|_| invalid())?;

        Ok(Self { network })
    }

    /// The normalized network address (host octet zero).
    pub fn network(&self) -> Ipv4Addr {
        self.network.network()
    }

    /// Host addresses in ascending order, excluding network and broadcast.
    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> {
        let network = self.network.network();
        let broadcast = self.network.broadcast();
        self.network
            .iter()
            .filter(move |ip| *ip != network && *ip != broadcast)
    }

    /// Pair every host with `port`.
    pub fn targets(&self, port: Port) -> impl Iterator<Item = Target> {
        self.hosts().map(move |addr| Target::new(addr, port))
    }
}

impl FromStr for Subnet {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network.network(), Self::PREFIX)
    }
}

/// Parse every subnet argument, failing on the first malformed one.
pub fn parse_subnets<I, S>(specs: I) -> Result<Vec<Subnet>, InvalidArgument>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    specs.into_iter().map(|s| Subnet::parse(s.as_ref())).collect()
}

/// Expand subnets into targets: subnet order first, then ascending host octet.
pub fn enumerate_targets(subnets: &[Subnet], port: Port) -> Vec<Target> {
    let mut targets = Vec::with_capacity(subnets.len() * Subnet::HOSTS);
    for subnet in subnets {
        targets.extend(subnet.targets(port));
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subnet_expands_to_254_hosts() {
        let subnet = Subnet::parse("10.60.3.0/24").unwrap();
        let hosts: Vec<Ipv4Addr> = subnet.hosts().collect();

        assert_eq!(hosts.len(), Subnet::HOSTS);
        assert_eq!(hosts.first(), Some(&Ipv4Addr::new(10, 60, 3, 1)));
        assert_eq!(hosts.last(), Some(&Ipv4Addr::new(10, 60, 3, 254)));
        assert!(hosts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_host_octet_is_normalized() {
        let subnet = Subnet::parse("10.0.0.1/24").unwrap();
        assert_eq!(subnet.network(), Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(subnet.to_string(), "10.0.0.0/24");

        let first = subnet.hosts().next().unwrap();
        assert_eq!(first, Ipv4Addr::new(10, 0, 0, 1));
    }

    #[test]
    fn test_leading_zero_octets_accepted() {
        let subnet = Subnet::parse("010.001.002.000/24").unwrap();
        assert_eq!(subnet.network(), Ipv4Addr::new(10, 1, 2, 0));
    }

    #[test]
    fn test_invalid_subnets_rejected() {
        for bad in [
            "10.0.0.0",
            "10.0.0.0/16",
            "10.0.0.0/32",
            "10.0.0.0/024",
            "10.0.0/24",
            "10.0.0.0.0/24",
            "256.0.0.0/24",
            "10.0.0.1000/24",
            "10.0.0.x/24",
            "10..0.0/24",
            " 10.0.0.0/24",
            "10.0.0.0/24 ",
            "::1/24",
            "",
        ] {
            assert_eq!(
                Subnet::parse(bad),
                Err(InvalidArgument::Subnet(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_enumeration_order_across_subnets() {
        let subnets = parse_subnets(["10.0.1.0/24", "10.0.0.0/24"]).unwrap();
        let targets = enumerate_targets(&subnets, Port::new(80));

        assert_eq!(targets.len(), 2 * Subnet::HOSTS);
        assert_eq!(targets[0], Target::new(Ipv4Addr::new(10, 0, 1, 1), Port::new(80)));
        assert_eq!(targets[253].addr, Ipv4Addr::new(10, 0, 1, 254));
        assert_eq!(targets[254].addr, Ipv4Addr::new(10, 0, 0, 1));
        assert!(targets.iter().all(|t| t.port == Port::new(80)));
    }

    #[test]
    fn test_parse_subnets_stops_at_first_error() {
        let err = parse_subnets(["10.0.0.0/24", "bogus", "10.0.2.0/8"]).unwrap_err();
        assert_eq!(err, InvalidArgument::Subnet("bogus".to_string()));
    }

    #[test]
    fn test_target_display() {
        let target = Target::new(Ipv4Addr::new(192, 168, 1, 9), Port::new(8090));
        assert_eq!(target.to_string(), "192.168.1.9:8090");
        assert_eq!(target.socket_addr().port(), 8090);
    }
}
