//! Test helpers
//!
//! Spawns an in-process hub on an ephemeral port and provides a small
//! line-oriented TCP client for scenario tests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// How long a single read may wait before the test fails
const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// How many unrelated lines to skip when waiting for a specific one
const SKIP_LIMIT: usize = 16;

/// In-process hub bound to an ephemeral port
pub struct TestServer {
    pub addr: SocketAddr,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a fresh hub; session identities start at 1 per server
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            let _ = hub_server::serve(listener).await;
        });

        Ok(Self {
            addr,
            _handle: handle,
        })
    }

    /// Open a client connection to this server
    pub async fn connect(&self) -> Result<TestClient> {
        TestClient::connect(self.addr).await
    }
}

/// Line-oriented TCP client
pub struct TestClient {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        let (read_half, write_half) = stream.into_split();

        Ok(Self {
            lines: BufReader::new(read_half).lines(),
            writer: write_half,
        })
    }

    /// Send one line of chat
    pub async fn send_line(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        Ok(())
    }

    /// Read the next line, failing after [`READ_TIMEOUT`]
    pub async fn next_line(&mut self) -> Result<String> {
        let line = timeout(READ_TIMEOUT, self.lines.next_line())
            .await
            .context("timed out waiting for a line")??;

        match line {
            Some(line) => Ok(line),
            None => bail!("connection closed by server"),
        }
    }

    /// Read lines until one contains `needle`, returning it
    ///
    /// Join/leave notices interleave with chat lines depending on event
    /// arrival order, so scenario assertions skip past unrelated lines
    /// instead of pinning the exact sequence.
    pub async fn expect_line_containing(&mut self, needle: &str) -> Result<String> {
        for _ in 0..SKIP_LIMIT {
            let line = self.next_line().await?;
            if line.contains(needle) {
                return Ok(line);
            }
        }
        bail!("gave up waiting for a line containing {needle:?}")
    }

    /// Shut down the write side and drop the connection
    pub async fn close(mut self) -> Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
