//! End-to-end chat scenarios over real TCP
//!
//! Each test starts its own hub on an ephemeral port, so identities are
//! predictable: the first connection is UID 1, the second UID 2, and so
//! on.

use anyhow::Result;
use hub_core::notice;
use hub_core::session::SessionId;
use integration_tests::helpers::TestServer;

#[tokio::test]
async fn welcome_banner_carries_identity_and_address() -> Result<()> {
    let server = TestServer::start().await?;
    let mut client = server.connect().await?;

    let banner = client.next_line().await?;
    assert!(banner.starts_with("Welcome, 127.0.0.1:"), "got {banner:?}");
    assert!(banner.contains("UID:1"), "got {banner:?}");
    assert!(banner.contains("Enter At:"), "got {banner:?}");
    Ok(())
}

#[tokio::test]
async fn identities_are_issued_in_connection_order() -> Result<()> {
    let server = TestServer::start().await?;

    let mut first = server.connect().await?;
    first.expect_line_containing("UID:1").await?;

    let mut second = server.connect().await?;
    second.expect_line_containing("UID:2").await?;

    let mut third = server.connect().await?;
    third.expect_line_containing("UID:3").await?;
    Ok(())
}

#[tokio::test]
async fn join_chat_and_leave_are_broadcast() -> Result<()> {
    let server = TestServer::start().await?;

    let mut alice = server.connect().await?;
    alice.expect_line_containing("UID:1").await?;

    let mut bob = server.connect().await?;
    bob.expect_line_containing("UID:2").await?;

    // Alice is told that session 2 arrived.
    alice
        .expect_line_containing(&notice::enter(SessionId::new(2)))
        .await?;

    // Alice speaks; Bob receives the identity-prefixed line.
    alice.send_line("hello").await?;
    let line = bob.expect_line_containing("1hello").await?;
    assert_eq!(line, notice::chat(SessionId::new(1), "hello"));

    // Alice hangs up; Bob is told she left.
    alice.close().await?;
    bob.expect_line_containing(&notice::left(SessionId::new(1)))
        .await?;
    Ok(())
}

#[tokio::test]
async fn late_joiner_misses_earlier_messages() -> Result<()> {
    let server = TestServer::start().await?;

    let mut alice = server.connect().await?;
    alice.expect_line_containing("UID:1").await?;
    let mut bob = server.connect().await?;
    bob.expect_line_containing("UID:2").await?;

    alice.send_line("early").await?;
    // Bob receiving it proves the broadcast was processed before Carol
    // attaches below.
    bob.expect_line_containing("1early").await?;

    let mut carol = server.connect().await?;
    carol.expect_line_containing("UID:3").await?;

    alice.send_line("later").await?;

    // Carol sees the later message but must never see the earlier one.
    let mut seen = Vec::new();
    loop {
        let line = carol.next_line().await?;
        let done = line.contains("1later");
        seen.push(line);
        if done {
            break;
        }
    }
    assert!(
        seen.iter().all(|line| !line.contains("1early")),
        "late joiner received retroactive delivery: {seen:?}"
    );
    Ok(())
}

#[tokio::test]
async fn chat_flows_both_ways() -> Result<()> {
    let server = TestServer::start().await?;

    let mut alice = server.connect().await?;
    alice.expect_line_containing("UID:1").await?;
    let mut bob = server.connect().await?;
    bob.expect_line_containing("UID:2").await?;
    alice
        .expect_line_containing(&notice::enter(SessionId::new(2)))
        .await?;

    alice.send_line("ping").await?;
    bob.expect_line_containing("1ping").await?;

    bob.send_line("pong").await?;
    alice.expect_line_containing("2pong").await?;
    Ok(())
}
