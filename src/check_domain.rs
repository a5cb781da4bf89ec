/// Check whether the proxy domain is resolvable
///
/// Meant as a pre-flight check before bootstrapping the client;
/// domains sinkholed to 0.0.0.0 are reported as unavailable
#[tracing::instrument(level = "trace")]
pub fn available<T: AsRef<str> + std::fmt::Debug>(domain: T) -> anyhow::Result<bool> {
    let ips = dns_lookup::lookup_host(domain.as_ref())?;

    Ok(!ips.is_empty() && !ips.contains(&std::net::IpAddr::from([0, 0, 0, 0])))
}
