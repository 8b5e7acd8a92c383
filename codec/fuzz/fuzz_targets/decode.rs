#![no_main]

use arbitrary::Arbitrary;
use cstruct::{ByteOrder, CStruct, Error, Options};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, CStruct)]
struct Inner {
    a: i32,
    b: u8,
}

#[derive(Debug, CStruct)]
struct Outer {
    flag: bool,
    inner: Inner,
    samples: [u16; 3],
    #[ctype(u8)]
    narrow: u64,
    scale: f64,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    big_endian: bool,
    signed: Option<bool>,
    raw: Vec<u8>,
}

fn fuzz(input: FuzzInput) {
    let mut options = Options::new();
    if input.big_endian {
        options = options.with_byte_order(ByteOrder::Big);
    }
    if let Some(signed) = input.signed {
        options = options.with_signed(signed);
    }

    let size = Outer::record_type()
        .expect("registration must succeed")
        .layout()
        .size();
    match Outer::decode_with(&input.raw[..], &options) {
        Ok(_) => assert!(input.raw.len() >= size),
        Err(Error::TruncatedInput { .. }) => assert!(input.raw.len() < size),
        Err(Error::InvalidBool | Error::OutOfRange(_)) => {}
        Err(err) => panic!("unexpected error: {err}"),
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
