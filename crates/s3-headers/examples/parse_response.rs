use futures::StreamExt;
use http::{HeaderMap, HeaderName, HeaderValue};
use micro_s3_headers::codec::{HeaderLine, HeaderLineDecoder};
use micro_s3_headers::handler::ResponseHeadersHandler;
use tokio_util::codec::FramedRead;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

static RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\n\
    x-amz-id-2: eftixk72aD6Ap51TnqcoF8eFidJG9Z/2mkiDFu8yU9AS1ed4OpIszj7UDNEHGran\r\n\
    x-amz-request-id: 318BC8BC148832E5\r\n\
    Date: Mon, 03 Sep 2012 21:34:56 GMT\r\n\
    Last-Modified: Mon, 12 Oct 2009 17:50:00 GMT\r\n\
    ETag: \"fba9dede5f27731c9771645a39863328\"\r\n\
    x-amz-meta-author: janedoe\r\n\
    Content-Length: 12\r\n\
    Content-Type: text/plain\r\n\
    Server: AmazonS3\r\n\
    \r\n\
    Hello World!";

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut handler = ResponseHeadersHandler::new();
    // the transport's own view of the headers, which is where last-modified comes from
    let mut transport_headers = HeaderMap::new();

    let mut lines = FramedRead::new(RESPONSE, HeaderLineDecoder::new());
    while let Some(line) = lines.next().await {
        match line {
            Ok(HeaderLine::Field(bytes)) => {
                record_header(&mut transport_headers, &bytes);
                handler.add(&bytes);
            }
            Ok(HeaderLine::End) => {
                handler.finalize(&transport_headers);
                break;
            }
            Err(e) => {
                error!(cause = %e, "failed to read response headers");
                return;
            }
        }
    }

    let properties = handler.properties();
    info!(
        request_id = properties.request_id,
        etag = properties.etag,
        content_length = properties.content_length,
        last_modified = ?properties.last_modified_time(),
        "parsed response properties"
    );
    for entry in properties.metadata {
        info!(name = entry.name, value = entry.value, "metadata");
    }
    info!(body = ?lines.read_buffer(), "left for the body reader");
}

fn record_header(headers: &mut HeaderMap, line: &[u8]) {
    let Some(colon) = line.iter().position(|b| *b == b':') else {
        return;
    };
    if let (Ok(name), Ok(value)) = (HeaderName::from_bytes(&line[..colon]), HeaderValue::from_bytes(line[colon + 1..].trim_ascii())) {
        headers.append(name, value);
    }
}
