//! Name resolution and connection establishment.

use std::{
    io,
    net::{SocketAddr, TcpStream, ToSocketAddrs},
    time::Duration,
};

use thiserror::Error;

/// Errors raised while connecting to the collector.
#[derive(Debug, Error)]
pub enum NetworkTargetError {
    #[error("failed to resolve \"{host}:{port}\": {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("\"{host}:{port}\" resolved to no addresses")]
    NoAddresses { host: String, port: u16 },
    #[error("failed to connect to remote server \"{host}:{port}\": {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
}

/// Remote collector endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    fn socket_addrs(&self) -> Result<Vec<SocketAddr>, NetworkTargetError> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map(Iterator::collect)
            .map_err(|source| NetworkTargetError::Resolve {
                host: self.host.clone(),
                port: self.port,
                source,
            })
    }
}

/// Resolve `endpoint` and try each address in turn until one connects.
pub fn connect(endpoint: &Endpoint, timeout: Duration) -> Result<TcpStream, NetworkTargetError> {
    let addrs = endpoint.socket_addrs()?;
    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => {
                stream.set_nodelay(true).ok();
                return Ok(stream);
            }
            Err(err) => last_err = Some(err),
        }
    }
    match last_err {
        Some(source) => Err(NetworkTargetError::Connect {
            host: endpoint.host.clone(),
            port: endpoint.port,
            source,
        }),
        None => Err(NetworkTargetError::NoAddresses {
            host: endpoint.host.clone(),
            port: endpoint.port,
        }),
    }
}
