#![no_main]
use libfuzzer_sys::fuzz_target;
use pomxml::Node;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(node) = Node::parse(s) {
            if let Ok(xml) = node.to_xml() {
                let _ = Node::parse(&xml);
            }
        }
    }
});
