//! Tests for the network target implementation.

use std::{
    io::Read,
    net::{SocketAddr, TcpListener},
    sync::mpsc,
    thread,
    time::Duration,
};

use rstest::{fixture, rstest};

use crate::{level::SeverityLevel, log_entry::LogEntry, target::LogTarget};

use super::{NetworkTarget, NetworkTargetError, WireFrame, read_frame};

#[fixture]
fn tcp_listener() -> TcpListener {
    TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener")
}

/// Accept one connection and forward every decoded frame until EOF.
fn spawn_collector(listener: TcpListener) -> (SocketAddr, mpsc::Receiver<WireFrame>) {
    let addr = listener.local_addr().expect("listener has address");
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        while let Ok(frame) = read_frame(&mut stream) {
            if tx.send(frame).is_err() {
                break;
            }
        }
    });
    (addr, rx)
}

fn recv(rx: &mpsc::Receiver<WireFrame>) -> WireFrame {
    rx.recv_timeout(Duration::from_secs(2))
        .expect("frame received")
}

#[rstest]
fn sends_entries_over_tcp(tcp_listener: TcpListener) {
    let (addr, rx) = spawn_collector(tcp_listener);
    let target = NetworkTarget::connect(SeverityLevel::Debug, addr.ip().to_string(), addr.port())
        .expect("connect");

    let entry = LogEntry::with_time("a.rs", 1, false, 1000)
        .with_level(SeverityLevel::Warning)
        .append("disk low");
    target.write(&entry).expect("write entry");

    assert_eq!(
        recv(&rx),
        WireFrame {
            timestamp: 1000,
            level: SeverityLevel::Warning,
            is_bare: false,
            message: "disk low".into(),
        }
    );
}

#[rstest]
fn preserves_entry_order(tcp_listener: TcpListener) {
    let (addr, rx) = spawn_collector(tcp_listener);
    let target =
        NetworkTarget::connect(SeverityLevel::Debug, "127.0.0.1", addr.port()).expect("connect");
    for i in 0..20 {
        target
            .write(&LogEntry::new("a.rs", i).append(i))
            .expect("write entry");
    }
    let messages: Vec<_> = (0..20).map(|_| recv(&rx).message).collect();
    let expected: Vec<_> = (0..20).map(|i| i.to_string()).collect();
    assert_eq!(messages, expected);
}

#[rstest]
fn refused_connection_fails_construction(tcp_listener: TcpListener) {
    let port = tcp_listener.local_addr().expect("address").port();
    drop(tcp_listener);
    let err = NetworkTarget::connect(SeverityLevel::Info, "127.0.0.1", port)
        .expect_err("nothing is listening");
    assert!(matches!(err, NetworkTargetError::Connect { port: p, .. } if p == port));
    assert!(err.to_string().contains("127.0.0.1"));
}

#[rstest]
fn drop_closes_the_socket(tcp_listener: TcpListener) {
    let addr = tcp_listener.local_addr().expect("address");
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (mut stream, _) = tcp_listener.accept().expect("accept connection");
        let mut buf = Vec::new();
        let read = stream.read_to_end(&mut buf);
        tx.send(read.map(|_| buf.len()).ok()).expect("report");
    });
    let target =
        NetworkTarget::connect(SeverityLevel::Info, "127.0.0.1", addr.port()).expect("connect");
    assert_eq!(target.peer_addr(), Some(addr));
    drop(target);
    let received = rx
        .recv_timeout(Duration::from_secs(2))
        .expect("collector saw EOF");
    assert_eq!(received, Some(0));
}

#[test]
fn threshold_is_reported() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
    let port = listener.local_addr().expect("address").port();
    let target = NetworkTarget::connect(SeverityLevel::Error, "localhost", port).expect("connect");
    assert_eq!(target.threshold(), SeverityLevel::Error);
    assert!(!target.accepts(&LogEntry::new("a.rs", 1).with_level(SeverityLevel::Warning)));
}
