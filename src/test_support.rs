//! In-memory remote server used by the unit tests.

use std::collections::HashMap;
use std::io::Cursor;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

use crate::error::TransportError;
use crate::file_info::FileInfo;
use crate::transport::{ConnectionParams, Connector, RemoteSession};

/// Returns a few bytes, then fails.
pub struct BrokenReader {
    served: bool,
}

impl BrokenReader {
    pub fn new() -> Self {
        Self { served: false }
    }
}

impl AsyncRead for BrokenReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        if self.served {
            Poll::Ready(Err(std::io::Error::other("connection reset")))
        } else {
            self.served = true;
            let data = b"partial";
            let len = data.len().min(buf.remaining());
            buf.put_slice(&data[..len]);
            Poll::Ready(Ok(()))
        }
    }
}

/// Contenuto del server finto. La directory di connessione è la chiave "".
#[derive(Debug, Default)]
pub struct RemoteFs {
    pub dirs: HashMap<String, Vec<FileInfo>>,
    pub files: HashMap<String, Vec<u8>>,
    pub fail_connect: bool,
    pub fail_change_dir: bool,
    pub fail_list: bool,
    pub fail_read: bool,
    pub connections: usize,
    pub closed: usize,
    pub changed_dirs: Vec<String>,
}

#[derive(Clone, Default)]
pub struct MockConnector {
    fs: Arc<Mutex<RemoteFs>>,
}

impl MockConnector {
    pub fn fs(&self) -> MutexGuard<'_, RemoteFs> {
        self.fs.lock().unwrap()
    }

    pub fn with_dir(self, path: &str, entries: Vec<FileInfo>) -> Self {
        self.fs().dirs.insert(path.to_string(), entries);
        self
    }

    pub fn with_file(self, path: &str, data: &[u8]) -> Self {
        self.fs().files.insert(path.to_string(), data.to_vec());
        self
    }
}

pub fn params() -> ConnectionParams {
    ConnectionParams {
        host: "nas.local".into(),
        port: None,
        user: "frame".into(),
        password: "secret".into(),
        host_key_fingerprint: None,
    }
}

fn join(cwd: &str, name: &str) -> String {
    if cwd.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", cwd, name)
    }
}

pub struct MockSession {
    fs: Arc<Mutex<RemoteFs>>,
    cwd: String,
}

impl RemoteSession for MockSession {
    type Reader = Box<dyn AsyncRead + Unpin + Send>;

    async fn change_dir(&mut self, path: &str) -> Result<(), TransportError> {
        let mut fs = self.fs.lock().unwrap();
        let target = join(&self.cwd, path);
        fs.changed_dirs.push(target.clone());
        if fs.fail_change_dir || !fs.dirs.contains_key(&target) {
            return Err(TransportError::NotADirectory(target));
        }
        self.cwd = target;
        Ok(())
    }

    async fn list(&mut self) -> Result<Vec<FileInfo>, TransportError> {
        let fs = self.fs.lock().unwrap();
        if fs.fail_list {
            return Err(TransportError::Protocol {
                path: self.cwd.clone(),
                reason: "listing aborted".into(),
            });
        }
        Ok(fs.dirs.get(&self.cwd).cloned().unwrap_or_default())
    }

    async fn retrieve(&mut self, file_name: &str) -> Result<Self::Reader, TransportError> {
        let fs = self.fs.lock().unwrap();
        let path = join(&self.cwd, file_name);
        match fs.files.get(&path) {
            None => Err(TransportError::Protocol {
                path,
                reason: "No such file".into(),
            }),
            Some(_) if fs.fail_read => Ok(Box::new(BrokenReader::new())),
            Some(data) => Ok(Box::new(Cursor::new(data.clone()))),
        }
    }

    async fn close(self) -> Result<(), TransportError> {
        self.fs.lock().unwrap().closed += 1;
        Ok(())
    }
}

impl Connector for MockConnector {
    type Session = MockSession;

    async fn connect(&self, params: &ConnectionParams) -> Result<MockSession, TransportError> {
        let mut fs = self.fs();
        if fs.fail_connect {
            return Err(TransportError::Connect {
                addr: params.host.clone(),
                reason: "refused".into(),
            });
        }
        fs.connections += 1;
        Ok(MockSession {
            fs: self.fs.clone(),
            cwd: String::new(),
        })
    }
}
