#![allow(dead_code, reason = "each test binary uses a different subset")]

use bytes::BytesMut;
use micro_http_codec::codec::RequestDecoder;
use micro_http_codec::protocol::{ContentFragment, FramingMode, HeaderList, Message, ParseError, RequestHead};
use tokio_util::codec::Decoder;

/// One request as seen by a caller, with its body fragments joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRequest {
    pub head: RequestHead,
    pub framing: FramingMode,
    pub body: Vec<u8>,
    pub trailers: HeaderList,
}

/// Feeds `input` to a fresh decoder in pieces of the given sizes (cycled), then signals end of stream.
pub fn decode_in_pieces(input: &[u8], sizes: &[usize]) -> (Vec<Message>, Option<ParseError>) {
    let mut decoder = RequestDecoder::new();
    let mut buffer = BytesMut::new();
    let mut messages = Vec::new();

    let mut offset = 0;
    let mut sizes = sizes.iter().copied().filter(|size| *size > 0).cycle();
    while offset < input.len() {
        let size = sizes.next().unwrap_or(input.len()).min(input.len() - offset);
        buffer.extend_from_slice(&input[offset..offset + size]);
        offset += size;

        loop {
            match decoder.decode(&mut buffer) {
                Ok(Some(message)) => messages.push(message),
                Ok(None) => break,
                Err(e) => return (messages, Some(e)),
            }
        }
    }

    loop {
        match decoder.decode_eof(&mut buffer) {
            Ok(Some(message)) => messages.push(message),
            Ok(None) => return (messages, None),
            Err(e) => return (messages, Some(e)),
        }
    }
}

pub fn decode_whole(input: &[u8]) -> (Vec<Message>, Option<ParseError>) {
    decode_in_pieces(input, &[input.len().max(1)])
}

pub fn decode_bytewise(input: &[u8]) -> (Vec<Message>, Option<ParseError>) {
    decode_in_pieces(input, &[1])
}

/// Groups a message sequence into requests, checking the head/fragments/final-fragment shape.
pub fn group(messages: Vec<Message>) -> Vec<DecodedRequest> {
    let mut requests: Vec<DecodedRequest> = Vec::new();
    let mut open = false;

    for message in messages {
        match message {
            Message::Header(head, framing) => {
                assert!(!open, "request head before the previous body ended");
                open = true;
                requests.push(DecodedRequest { head, framing, body: Vec::new(), trailers: HeaderList::new() });
            }
            Message::Payload(fragment) => {
                assert!(open, "body fragment without a request head");
                let request = requests.last_mut().unwrap();
                request.body.extend_from_slice(fragment.bytes());
                if fragment.is_last() {
                    request.trailers = fragment.trailers().clone();
                    open = false;
                }
            }
        }
    }

    assert!(!open, "last request did not finish");
    requests
}

pub fn payloads(messages: &[Message]) -> Vec<ContentFragment> {
    messages.iter().filter_map(|message| message.clone().into_payload()).collect()
}
