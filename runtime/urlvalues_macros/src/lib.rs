use proc_macro::TokenStream;

mod decode;
mod unmarshal;

#[proc_macro_derive(Unmarshal, attributes(urlvalue))]
pub fn derive_unmarshal(input: TokenStream) -> TokenStream {
    unmarshal::derive_unmarshal(input)
}

#[proc_macro_derive(Decode, attributes(urlvalue))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    decode::derive_decode(input)
}
