mod arn;
mod binary;
mod boolean;
mod date;
mod ipaddr;
mod keys;
mod null;
mod numeric;

#[allow(non_upper_case_globals)]
pub mod op;

mod operator;
mod string;
mod variant;

pub use {
    arn::ArnCmp,
    binary::binary_value,
    date::{date_value, DateCmp},
    keys::{global_condition_key, global_condition_keys, ConditionKeyType, GlobalConditionKey},
    numeric::NumericCmp,
    op::ConditionOp,
    operator::{Operator, SetQualifier},
    string::StringCmp,
    variant::Variant,
};
use {
    crate::{from_str_json, serutil::StringLikeList},
    log::trace,
    serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::{
        borrow::Borrow,
        collections::{
            btree_map::{
                Entry, IntoIter, IntoKeys, IntoValues, Iter, IterMut, Keys, Range, RangeMut, Values, ValuesMut,
            },
            BTreeMap,
        },
        iter::{Extend, FromIterator, IntoIterator},
        ops::{Index, RangeBounds},
    },
};

/// The value(s) a condition key is compared against.
pub type ConditionValue = StringLikeList<String>;

pub type ConditionMap = BTreeMap<String, ConditionValue>;

/// The `Condition` block of a statement: operator to condition key to value(s).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Condition {
    map: BTreeMap<Operator, ConditionMap>,
}

from_str_json!(Condition);

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::deserialize(deserializer)?;

        Ok(Self {
            map,
        })
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.map.serialize(serializer)
    }
}

impl Condition {
    #[inline]
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn append(&mut self, other: &mut Self) {
        self.map.append(&mut other.map);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.map.clear();
    }

    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Operator: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.contains_key(key)
    }

    #[inline]
    pub fn entry(&mut self, key: Operator) -> Entry<'_, Operator, ConditionMap> {
        self.map.entry(key)
    }

    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&ConditionMap>
    where
        Operator: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.get(key)
    }

    #[inline]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&Operator, &ConditionMap)>
    where
        Operator: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.get_key_value(key)
    }

    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut ConditionMap>
    where
        Operator: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.get_mut(key)
    }

    #[inline]
    pub fn insert(&mut self, key: Operator, value: ConditionMap) -> Option<ConditionMap> {
        self.map.insert(key, value)
    }

    #[inline]
    pub fn into_keys(self) -> IntoKeys<Operator, ConditionMap> {
        self.map.into_keys()
    }

    #[inline]
    pub fn into_values(self) -> IntoValues<Operator, ConditionMap> {
        self.map.into_values()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, Operator, ConditionMap> {
        self.map.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, Operator, ConditionMap> {
        self.map.iter_mut()
    }

    #[inline]
    pub fn keys(&self) -> Keys<'_, Operator, ConditionMap> {
        self.map.keys()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn range<T, R>(&self, range: R) -> Range<'_, Operator, ConditionMap>
    where
        Operator: Borrow<T>,
        T: Ord + ?Sized,
        R: RangeBounds<T>,
    {
        self.map.range(range)
    }

    #[inline]
    pub fn range_mut<T, R>(&mut self, range: R) -> RangeMut<'_, Operator, ConditionMap>
    where
        Operator: Borrow<T>,
        T: Ord + ?Sized,
        R: RangeBounds<T>,
    {
        self.map.range_mut(range)
    }

    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<ConditionMap>
    where
        Operator: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.remove(key)
    }

    #[inline]
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(Operator, ConditionMap)>
    where
        Operator: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.remove_entry(key)
    }

    #[inline]
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Operator, &mut ConditionMap) -> bool,
    {
        self.map.retain(f)
    }

    #[inline]
    pub fn split_off<Q>(&mut self, key: &Q) -> Condition
    where
        Operator: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Condition {
            map: self.map.split_off(key),
        }
    }

    #[inline]
    pub fn values(&self) -> Values<'_, Operator, ConditionMap> {
        self.map.values()
    }

    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<'_, Operator, ConditionMap> {
        self.map.values_mut()
    }

    /// Set `key` under `op` to `value`, replacing any value already held for that operator and key.
    pub fn add<K, V>(&mut self, op: Operator, key: K, value: V) -> Option<ConditionValue>
    where
        K: Into<String>,
        V: Into<ConditionValue>,
    {
        let key = key.into();
        let value = value.into();
        trace!("Condition::add: {} {} = {}", op, key, value);
        self.map.entry(op).or_default().insert(key, value)
    }

    /// The value held for `key` under `op`, if any.
    pub fn value(&self, op: &Operator, key: &str) -> Option<&ConditionValue> {
        self.map.get(op).and_then(|map| map.get(key))
    }
}

impl Default for Condition {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<(Operator, ConditionMap)> for Condition {
    #[inline]
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (Operator, ConditionMap)>,
    {
        self.map.extend(iter)
    }
}

impl<const N: usize> From<[(Operator, ConditionMap); N]> for Condition {
    #[inline]
    fn from(array: [(Operator, ConditionMap); N]) -> Self {
        Condition {
            map: BTreeMap::from(array),
        }
    }
}

impl FromIterator<(Operator, ConditionMap)> for Condition {
    #[inline]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (Operator, ConditionMap)>,
    {
        Condition {
            map: BTreeMap::from_iter(iter),
        }
    }
}

impl<Q> Index<&Q> for Condition
where
    Operator: Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = ConditionMap;

    fn index(&self, key: &Q) -> &ConditionMap {
        self.map.index(key)
    }
}

impl<'a> IntoIterator for &'a Condition {
    type Item = (&'a Operator, &'a ConditionMap);
    type IntoIter = Iter<'a, Operator, ConditionMap>;
    fn into_iter(self) -> Iter<'a, Operator, ConditionMap> {
        self.map.iter()
    }
}

impl<'a> IntoIterator for &'a mut Condition {
    type Item = (&'a Operator, &'a mut ConditionMap);
    type IntoIter = IterMut<'a, Operator, ConditionMap>;
    fn into_iter(self) -> IterMut<'a, Operator, ConditionMap> {
        self.map.iter_mut()
    }
}

impl IntoIterator for Condition {
    type Item = (Operator, ConditionMap);
    type IntoIter = IntoIter<Operator, ConditionMap>;
    fn into_iter(self) -> IntoIter<Operator, ConditionMap> {
        self.map.into_iter()
    }
}
