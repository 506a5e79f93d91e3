use std::collections::BTreeMap;

use urlvalues::{Unmarshal, UrlValues, unmarshal};

#[derive(Default, Unmarshal)]
pub struct Inner {
    #[urlvalue("depth,default:2")]
    pub depth: u8,
}

#[derive(Default, Unmarshal)]
pub struct Outer {
    pub inner: Inner,
    pub optional: Option<Inner>,
    pub labels: BTreeMap<String, i32>,
    pub nested_list: Vec<Option<u16>>,
}

fn main() {
    let mut target = Outer::default();
    unmarshal(UrlValues::parse("labels=a:1;b:2&nested_list=1;2"), &mut target).unwrap();
    assert_eq!(target.inner.depth, 2);
    assert_eq!(target.optional.map(|i| i.depth), Some(2));
    assert_eq!(target.labels.len(), 2);
    assert_eq!(target.nested_list, [Some(1), Some(2)]);
}
