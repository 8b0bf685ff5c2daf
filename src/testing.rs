//! 单连接 HTTP 测试服务器

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// 只应答一次请求，`request()` 返回收到的原始请求
pub struct OneShotServer {
    pub url: String,
    handle: JoinHandle<String>,
}

impl OneShotServer {
    pub fn request(self) -> String {
        self.handle.join().unwrap()
    }
}

/// `status` 形如 `"404 Not Found"`
pub fn serve_once(status: &str, content_type: &str, body: &str) -> OneShotServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    );

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);

        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
            }
            head.push_str(&line);
        }

        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();

        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        format!("{}\r\n{}", head, String::from_utf8_lossy(&body))
    });

    OneShotServer { url, handle }
}

/// 绑定后立即释放，得到一个无人监听的本地地址
pub fn closed_local_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
