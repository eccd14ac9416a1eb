use {
    serde::{
        de::{self, value::MapAccessDeserializer, Deserializer, IntoDeserializer, MapAccess, SeqAccess, Visitor},
        ser::{SerializeSeq, Serializer},
        Deserialize, Serialize,
    },
    std::{
        fmt::{Debug, Display, Formatter, Result as FmtResult},
        marker::PhantomData,
        mem,
        ops::Index,
        slice,
    },
};

/// Implement Display for a given class by formatting it as pretty-printed JSON.
#[macro_export]
macro_rules! display_json {
    ($cls:ident) => {
        impl std::fmt::Display for $cls {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                $crate::serutil::write_pretty_json(self, f)
            }
        }
    };
}

/// Implement FromStr for a given class by parsing it as JSON.
#[macro_export]
macro_rules! from_str_json {
    ($cls:ident) => {
        impl ::std::str::FromStr for $cls {
            type Err = ::serde_json::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match ::serde_json::from_str::<Self>(s) {
                    Ok(result) => Ok(result),
                    Err(e) => {
                        ::log::debug!("Failed to parse: {}: {:?}", s, e);
                        Err(e)
                    }
                }
            }
        }
    };
}

/// Write `value` to `f` as JSON indented by four spaces.
pub(crate) fn write_pretty_json<T: Serialize + ?Sized>(value: &T, f: &mut Formatter) -> FmtResult {
    let buf = Vec::new();
    let serde_formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(buf, serde_formatter);
    match value.serialize(&mut ser) {
        Ok(()) => (),
        Err(e) => {
            log::error!("Failed to serialize: {}", e);
            return Err(std::fmt::Error {});
        }
    };
    match std::str::from_utf8(&ser.into_inner()) {
        Ok(s) => write!(f, "{}", s),
        Err(e) => {
            log::error!("JSON serialization contained non-UTF-8 characters: {}", e);
            Err(std::fmt::Error {})
        }
    }
}

/// How a [StringLikeList] was written: a bare scalar or a JSON array.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListKind {
    Single,
    List,
}

/// StringLikeList allows a JSON field to be a string-like scalar or a list of them.
///
/// IAM accepts `"Action": "s3:GetObject"` and `"Action": ["s3:GetObject"]` interchangeably, and likewise for
/// resources, principals, and condition values. The shape that was parsed is preserved so documents round-trip. When
/// deserializing, booleans and numbers are accepted and converted to their string form, the same way the IAM console
/// stores them.
#[derive(Clone, Debug)]
pub enum StringLikeList<T> {
    Single(T),
    List(Vec<T>),
}

impl<T> StringLikeList<T> {
    #[inline]
    pub fn kind(&self) -> ListKind {
        match self {
            Self::Single(_) => ListKind::Single,
            Self::List(_) => ListKind::List,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Single(v) => slice::from_ref(v),
            Self::List(v) => v.as_slice(),
        }
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn to_vec(&self) -> Vec<&T> {
        self.iter().collect()
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Single(v) => vec![v],
            Self::List(v) => v,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(_) => false,
            Self::List(v) => v.is_empty(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::List(v) => v.len(),
        }
    }

    /// Append a value. A single value is promoted to a list.
    pub fn push(&mut self, value: T) {
        match self {
            Self::List(v) => v.push(value),
            Self::Single(_) => {
                let previous = mem::replace(self, Self::List(Vec::with_capacity(2)));
                if let (Self::Single(first), Self::List(v)) = (previous, self) {
                    v.push(first);
                    v.push(value);
                }
            }
        }
    }
}

impl<T> Default for StringLikeList<T> {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl<T: PartialEq> PartialEq for StringLikeList<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Single(my_el), Self::Single(other_el)) => my_el == other_el,
            (Self::Single(my_el), Self::List(other_el)) => other_el.len() == 1 && my_el == &other_el[0],
            (Self::List(my_el), Self::Single(other_el)) => my_el.len() == 1 && &my_el[0] == other_el,
            (Self::List(my_el), Self::List(other_el)) => my_el == other_el,
        }
    }
}

impl<T: Eq> Eq for StringLikeList<T> {}

impl<T> From<T> for StringLikeList<T> {
    fn from(v: T) -> Self {
        Self::Single(v)
    }
}

impl<T> From<Vec<T>> for StringLikeList<T> {
    fn from(v: Vec<T>) -> Self {
        Self::List(v)
    }
}

impl<T> Extend<T> for StringLikeList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> Index<usize> for StringLikeList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Self::Single(v) => {
                if index == 0 {
                    v
                } else {
                    panic!("index out of bounds: the len is 1 but the index is {}", index);
                }
            }
            Self::List(v) => &v[index],
        }
    }
}

impl<'a, T> IntoIterator for &'a StringLikeList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Serialize> Display for StringLikeList<T> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write_pretty_json(self, f)
    }
}

impl<T: Serialize> Serialize for StringLikeList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(v) => v.serialize(serializer),
            Self::List(v) => v.serialize(serializer),
        }
    }
}

fn from_scalar<'de, T: Deserialize<'de>, E: de::Error>(v: &str) -> Result<T, E> {
    T::deserialize(v.into_deserializer())
}

/// One element of a string-like list, accepting strings, booleans, and numbers.
struct Scalar<T>(T);

struct ScalarVisitor<T> {
    phantom: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for ScalarVisitor<T> {
    type Value = Scalar<T>;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Scalar(from_scalar(v)?))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Scalar(from_scalar(&v.to_string())?))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Scalar(from_scalar(&v.to_string())?))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Scalar(from_scalar(&v.to_string())?))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Scalar(from_scalar(&v.to_string())?))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Scalar<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor {
            phantom: PhantomData,
        })
    }
}

struct StringLikeListVisitor<T> {
    phantom: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for StringLikeListVisitor<T> {
    type Value = StringLikeList<T>;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "string or list of strings")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(StringLikeList::Single(from_scalar(v)?))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(StringLikeList::Single(from_scalar(&v.to_string())?))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(StringLikeList::Single(from_scalar(&v.to_string())?))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(StringLikeList::Single(from_scalar(&v.to_string())?))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(StringLikeList::Single(from_scalar(&v.to_string())?))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut result = match access.size_hint() {
            None => Vec::new(),
            Some(size) => Vec::with_capacity(size),
        };

        while let Some(Scalar(item)) = access.next_element::<Scalar<T>>()? {
            result.push(item);
        }

        Ok(StringLikeList::List(result))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for StringLikeList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StringLikeListVisitor {
            phantom: PhantomData,
        })
    }
}

/// ElementList allows a JSON field to be an element (represented as a JSON object) or a list of elements
/// (represented as a JSON array).
#[derive(Clone)]
pub enum ElementList<E> {
    Single(E),
    List(Vec<E>),
}

impl<E> ElementList<E> {
    #[inline]
    pub fn as_slice(&self) -> &[E] {
        match self {
            Self::Single(element) => slice::from_ref(element),
            Self::List(element_list) => element_list.as_slice(),
        }
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, E> {
        self.as_slice().iter()
    }

    pub fn into_vec(self) -> Vec<E> {
        match self {
            Self::Single(element) => vec![element],
            Self::List(element_list) => element_list,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(_) => false,
            Self::List(element_list) => element_list.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::List(element_list) => element_list.len(),
        }
    }

    /// Append an element. A single element is promoted to a list.
    pub fn push(&mut self, element: E) {
        match self {
            Self::List(element_list) => element_list.push(element),
            Self::Single(_) => {
                let previous = mem::replace(self, Self::List(Vec::with_capacity(2)));
                if let (Self::Single(first), Self::List(element_list)) = (previous, self) {
                    element_list.push(first);
                    element_list.push(element);
                }
            }
        }
    }
}

impl<E> Default for ElementList<E> {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl<E: Debug> Debug for ElementList<E> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Single(v) => write!(f, "{:?}", v),
            Self::List(v) => write!(f, "{:?}", v),
        }
    }
}

impl<E> PartialEq for ElementList<E>
where
    E: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Single(v1), Self::Single(v2)) => v1 == v2,
            (Self::List(v1), Self::List(v2)) => v1 == v2,
            (Self::Single(v1), Self::List(v2)) => v2.len() == 1 && v1 == &v2[0],
            (Self::List(v1), Self::Single(v2)) => v1.len() == 1 && &v1[0] == v2,
        }
    }
}

impl<E> Eq for ElementList<E> where E: Eq {}

impl<E> From<E> for ElementList<E> {
    fn from(v: E) -> Self {
        Self::Single(v)
    }
}

impl<E> From<Vec<E>> for ElementList<E> {
    fn from(v: Vec<E>) -> Self {
        Self::List(v)
    }
}

impl<E> Index<usize> for ElementList<E> {
    type Output = E;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Self::Single(v) => {
                if index == 0 {
                    v
                } else {
                    panic!("index out of bounds: the len is 1 but the index is {}", index);
                }
            }
            Self::List(v) => &v[index],
        }
    }
}

struct ElementListVisitor<E> {
    phantom: PhantomData<E>,
}

impl<'de, E: Deserialize<'de>> Visitor<'de> for ElementListVisitor<E> {
    type Value = ElementList<E>;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "element or list of elements")
    }

    fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
        Ok(ElementList::Single(E::deserialize(MapAccessDeserializer::new(access))?))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut result: Vec<E> = match access.size_hint() {
            None => Vec::new(),
            Some(size) => Vec::with_capacity(size),
        };

        while let Some(item) = access.next_element::<E>()? {
            result.push(item);
        }
        Ok(ElementList::List(result))
    }
}

impl<'de, E: Deserialize<'de>> Deserialize<'de> for ElementList<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ElementListVisitor {
            phantom: PhantomData,
        })
    }
}

impl<E: Serialize> Serialize for ElementList<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(v) => v.serialize(serializer),
            Self::List(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for e in v {
                    seq.serialize_element(e)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::serutil::{ElementList, ListKind, StringLikeList},
        indoc::indoc,
        pretty_assertions::assert_eq,
        serde::Serialize,
        std::panic::catch_unwind,
    };

    #[test_log::test]
    fn test_basic_ops() {
        let el1a = ElementList::<u32>::Single(1);
        let el1b = ElementList::<u32>::List(vec![1]);
        let el2a = ElementList::<u32>::List(vec![1, 2]);
        let el2b = ElementList::<u32>::List(vec![1, 2]);
        let el3 = ElementList::<u32>::default();
        assert_eq!(el1a, el1b);
        assert_eq!(el1b, el1a);
        assert_ne!(el1a, el2a);
        assert_ne!(el2b, el1a);
        assert_eq!(el2a, el2b);

        assert!(!el1a.is_empty());
        assert!(!el1b.is_empty());
        assert!(!el2a.is_empty());
        assert!(el3.is_empty());

        assert_eq!(el1a.len(), 1);
        assert_eq!(el2a.len(), 2);
        assert_eq!(el3.len(), 0);
        assert_eq!(el2a.iter().copied().collect::<Vec<_>>(), vec![1, 2]);

        assert_eq!(format!("{:?}", el1a), "1");
        assert_eq!(format!("{:?}", el1b), "[1]");

        assert_eq!(el1a[0], 1);
        assert_eq!(el1b[0], 1);
        let e = catch_unwind(|| {
            let new_el = ElementList::<u32>::Single(1);
            println!("This won't print: {}", &new_el[1]);
        })
        .unwrap_err();
        assert_eq!(*e.downcast::<String>().unwrap(), "index out of bounds: the len is 1 but the index is 1");

        let mut el = ElementList::Single(1u32);
        el.push(2);
        assert_eq!(el, el2a);
    }

    #[test_log::test]
    fn test_string_like_push() {
        let mut sl = StringLikeList::Single("a".to_string());
        assert_eq!(sl.kind(), ListKind::Single);
        sl.push("b".to_string());
        assert_eq!(sl.kind(), ListKind::List);
        assert_eq!(sl.to_vec(), vec!["a", "b"]);

        let mut empty = StringLikeList::<String>::default();
        assert!(empty.is_empty());
        empty.extend(vec!["x".to_string(), "x".to_string()]);
        assert_eq!(empty.len(), 2);
        assert_eq!(empty.as_slice(), &["x".to_string(), "x".to_string()]);

        let e = catch_unwind(|| {
            let sl = StringLikeList::Single(1u8);
            println!("This won't print: {}", sl[1]);
        })
        .unwrap_err();
        assert_eq!(*e.downcast::<String>().unwrap(), "index out of bounds: the len is 1 but the index is 1");
    }

    #[test_log::test]
    fn test_string_like_scalars() {
        let sl: StringLikeList<String> = serde_json::from_str("true").unwrap();
        assert_eq!(sl, StringLikeList::Single("true".to_string()));

        let sl: StringLikeList<String> = serde_json::from_str(r#"["a", 3600, false]"#).unwrap();
        assert_eq!(sl.to_vec(), vec!["a", "3600", "false"]);

        let e = serde_json::from_str::<StringLikeList<String>>(r#"{"a": 1}"#).unwrap_err();
        assert!(e.to_string().starts_with("invalid type: map, expected string or list of strings"));

        assert_eq!(
            StringLikeList::<String>::from(vec!["a".to_string(), "b".to_string()]).to_string(),
            indoc! {r#"
            [
                "a",
                "b"
            ]"#}
        );
        assert_eq!(StringLikeList::<String>::from("a".to_string()).to_string(), r#""a""#);
    }

    #[derive(Clone, Debug)]
    struct SerFail {}
    display_json!(SerFail);

    impl Serialize for SerFail {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("Serialization failed"))
        }
    }

    #[derive(Clone, Debug)]
    struct SerBadUtf8 {}
    display_json!(SerBadUtf8);

    impl Serialize for SerBadUtf8 {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let bad = unsafe { String::from_utf8_unchecked(vec![0xc0]) };
            serializer.serialize_str(&bad)
        }
    }

    #[test_log::test]
    fn test_ser_fail() {
        let el = ElementList::Single(SerFail {});
        let result = serde_json::to_string(&el);
        assert!(result.is_err());

        let e = catch_unwind(|| SerFail {}.to_string()).unwrap_err();
        let e2 = e.downcast::<String>().unwrap();
        assert!((*e2).contains("a Display implementation returned an error"));

        let e = catch_unwind(|| SerBadUtf8 {}.to_string()).unwrap_err();
        let e2 = e.downcast::<String>().unwrap();
        assert!((*e2).contains("a Display implementation returned an error"));
    }
}
