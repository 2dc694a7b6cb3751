#![no_main]
use libfuzzer_sys::fuzz_target;
use roughtime_proto::wire::decode;
use roughtime_proto::Tag;

fuzz_target!(|data: &[u8]| {
    // Walk arbitrary bytes with the cursor; must not panic.
    let _ = decode(data, |st| {
        let _ = st.bytes(Tag::SIG);
        let _ = st.bytes(Tag::NONC)?;
        let _ = st.uint32(Tag::RADI);
        let _ = st.time(Tag::MIDP);
        st.message(Tag::SREP, |sub| sub.bytes(Tag::ROOT))
    });
});
