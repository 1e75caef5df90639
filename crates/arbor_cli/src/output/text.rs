//! Text output formatter

use arbor_token::TokenStream;

pub fn output_text(stream: &TokenStream) {
    for token in stream.iter() {
        println!("{} {} {:?}", token.position, token.kind, token.value);
    }

    println!();
    println!("{} tokens", stream.len());
}
