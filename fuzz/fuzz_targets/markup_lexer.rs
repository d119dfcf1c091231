#![no_main]
use libfuzzer_sys::fuzz_target;
use pomxml::lexer::MarkupLexer;

fuzz_target!(|data: &[u8]| {
    let mut lexer = MarkupLexer::new(data);
    while let Ok(token) = lexer.next_token() {
        if token.is_eof() {
            break;
        }
    }
});
