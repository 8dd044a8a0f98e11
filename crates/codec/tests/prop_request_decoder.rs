//! Property tests for the request decoder

mod common;

use common::{decode_bytewise, decode_in_pieces, decode_whole, group};
use micro_http_codec::protocol::Message;
use proptest::prelude::*;

// ========================================
// Strategy definitions
// ========================================

#[derive(Debug, Clone)]
enum Framing {
    None,
    Length,
    Chunked(Vec<usize>),
}

#[derive(Debug, Clone)]
struct RawRequest {
    method: String,
    target: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    framing: Framing,
}

impl RawRequest {
    /// Serializes the request; `crlf` picks the terminator of each line in turn (cycled).
    fn to_bytes(&self, crlf: &[bool]) -> Vec<u8> {
        let mut endings = crlf.iter().copied().cycle();
        let mut out = Vec::new();
        let mut line = |out: &mut Vec<u8>, text: &[u8]| {
            out.extend_from_slice(text);
            let ending: &[u8] = if endings.next().unwrap_or(true) { b"\r\n" } else { b"\n" };
            out.extend_from_slice(ending);
        };

        line(&mut out, format!("{} {} HTTP/1.1", self.method, self.target).as_bytes());
        for (name, value) in &self.headers {
            line(&mut out, format!("{name}: {value}").as_bytes());
        }
        match &self.framing {
            Framing::None => {}
            Framing::Length => line(&mut out, format!("Content-Length: {}", self.body.len()).as_bytes()),
            Framing::Chunked(_) => line(&mut out, b"Transfer-Encoding: chunked"),
        }
        line(&mut out, b"");

        match &self.framing {
            Framing::None => {}
            Framing::Length => out.extend_from_slice(&self.body),
            Framing::Chunked(sizes) => {
                let mut rest = &self.body[..];
                let mut sizes = sizes.iter().copied().filter(|size| *size > 0).cycle();
                while !rest.is_empty() {
                    let size = sizes.next().unwrap_or(rest.len()).min(rest.len());
                    line(&mut out, format!("{size:x}").as_bytes());
                    line(&mut out, &rest[..size]);
                    rest = &rest[size..];
                }
                line(&mut out, b"0");
                line(&mut out, b"");
            }
        }
        out
    }

    fn expected_body(&self) -> &[u8] {
        match self.framing {
            Framing::None => &[],
            _ => &self.body,
        }
    }
}

fn http_method() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("GET".to_string()),
        Just("POST".to_string()),
        Just("PUT".to_string()),
        Just("DELETE".to_string()),
        Just("PATCH".to_string()),
        "[A-Z]{3,8}".prop_map(|s| s),
    ]
}

fn http_target() -> impl Strategy<Value = String> {
    prop_oneof![Just("/".to_string()), "/[a-zA-Z0-9/_.?=&-]{1,32}".prop_map(|s| s), Just("*".to_string())]
}

fn header_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9-]{1,16}".prop_map(|s| format!("X-{s}"))
}

fn header_value() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[!-~]([ -~]{0,30}[!-~])?".prop_map(|s| s)]
}

fn framing() -> impl Strategy<Value = Framing> {
    prop_oneof![
        Just(Framing::None),
        Just(Framing::Length),
        proptest::collection::vec(1usize..64, 1..4).prop_map(Framing::Chunked),
    ]
}

fn request() -> impl Strategy<Value = RawRequest> {
    (
        http_method(),
        http_target(),
        proptest::collection::vec((header_name(), header_value()), 0..8),
        proptest::collection::vec(any::<u8>(), 0..256),
        framing(),
    )
        .prop_map(|(method, target, headers, body, framing)| RawRequest { method, target, headers, body, framing })
}

fn piece_sizes() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(1usize..32, 1..16)
}

fn line_endings() -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), 1..24)
}

// ========================================
// Properties
// ========================================

proptest! {
    #[test]
    fn fragmentation_does_not_change_output(request in request(), sizes in piece_sizes()) {
        let input = request.to_bytes(&[true]);

        let (whole, whole_error) = decode_whole(&input);
        let (pieces, pieces_error) = decode_in_pieces(&input, &sizes);
        let (bytewise, bytewise_error) = decode_bytewise(&input);

        prop_assert!(whole_error.is_none(), "{:?}", whole_error);
        prop_assert!(pieces_error.is_none(), "{:?}", pieces_error);
        prop_assert!(bytewise_error.is_none(), "{:?}", bytewise_error);

        let expected = group(whole);
        prop_assert_eq!(expected.len(), 1);
        prop_assert_eq!(&expected[0].body[..], request.expected_body());
        prop_assert_eq!(expected[0].head.headers().len(), request.headers.len() + usize::from(!matches!(request.framing, Framing::None)));

        prop_assert_eq!(&group(pieces), &expected);
        prop_assert_eq!(&group(bytewise), &expected);
    }

    #[test]
    fn line_endings_do_not_change_output(request in request(), crlf in line_endings(), sizes in piece_sizes()) {
        let canonical = group(decode_whole(&request.to_bytes(&[true])).0);

        let (mixed, error) = decode_in_pieces(&request.to_bytes(&crlf), &sizes);
        prop_assert!(error.is_none(), "{:?}", error);
        prop_assert_eq!(group(mixed), canonical);
    }

    #[test]
    fn fixed_length_body_is_exact(body in proptest::collection::vec(any::<u8>(), 0..512), sizes in piece_sizes()) {
        let request = RawRequest {
            method: "POST".to_string(),
            target: "/upload".to_string(),
            headers: Vec::new(),
            body,
            framing: Framing::Length,
        };

        let (messages, error) = decode_in_pieces(&request.to_bytes(&[true]), &sizes);
        prop_assert!(error.is_none(), "{:?}", error);

        let fragments: Vec<_> = messages.into_iter().filter_map(Message::into_payload).collect();
        let total: usize = fragments.iter().map(|fragment| fragment.len()).sum();
        prop_assert_eq!(total, request.body.len());

        let (last, rest) = fragments.split_last().unwrap();
        prop_assert!(last.is_last());
        prop_assert!(rest.iter().all(|fragment| !fragment.is_last() && !fragment.is_empty()));
        prop_assert!(request.body.is_empty() || !last.is_empty());
    }

    #[test]
    fn pipelined_requests_stay_separate(first in request(), second in request(), split in any::<prop::sample::Index>()) {
        let first_bytes = first.to_bytes(&[true, false]);
        let second_bytes = second.to_bytes(&[false, true]);
        let input = [first_bytes.clone(), second_bytes.clone()].concat();

        let mut expected = group(decode_whole(&first_bytes).0);
        expected.extend(group(decode_whole(&second_bytes).0));

        let split = split.index(input.len());
        let (messages, error) = decode_in_pieces(&input, &[split.max(1), input.len()]);
        prop_assert!(error.is_none(), "{:?}", error);
        prop_assert_eq!(group(messages), expected);
    }
}
