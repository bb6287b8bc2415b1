//! Ordered list emulation
//!
//! List elements live under the relations `rdf:_1`, `rdf:_2`, ... of a
//! node. The index space starts at [`FIRST_INDEX`] and may have holes;
//! first and last are the lowest and highest populated index.

use std::collections::{BTreeMap, BTreeSet};

use super::node::{remove_at, Relations};
use super::{Capability, Literal, Node, NodeError, NodeResult, Value};
use crate::result::QueryResult;
use crate::vocab::rdf::{self, index_relation, sequence_number_of, FIRST_INDEX};

fn indices(relations: &Relations) -> BTreeSet<u64> {
    relations
        .keys()
        .filter_map(|relation| sequence_number_of(relation))
        .collect()
}

fn check_index(index: u64) -> NodeResult<()> {
    if index < FIRST_INDEX {
        return Err(NodeError::IndexOutOfRange(index));
    }
    Ok(())
}

/// Moves the values stored at `from` to `to`, which must be free.
fn move_index(relations: &mut Relations, from: u64, to: u64) {
    if let Some(values) = relations.shift_remove(&index_relation(from)) {
        relations.insert(index_relation(to), values);
    }
}

impl Node {
    /// Parses the list index of an index relation.
    ///
    /// ```
    /// use ldgraph::model::{Node, NodeError};
    ///
    /// assert_eq!(Node::parse_index("http://www.w3.org/1999/02/22-rdf-syntax-ns#_7"), Ok(7));
    /// assert!(matches!(
    ///     Node::parse_index("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
    ///     Err(NodeError::NotAnIndex(_))
    /// ));
    /// ```
    pub fn parse_index(relation: &str) -> NodeResult<u64> {
        let digits = rdf::index_digits(relation)
            .ok_or_else(|| NodeError::NotAnIndex(relation.to_string()))?;
        let index = digits
            .parse::<u64>()
            .map_err(|_| NodeError::NotRepresentable(relation.to_string()))?;
        check_index(index)?;
        Ok(index)
    }

    /// The lowest populated list index
    pub fn first(&self) -> Option<u64> {
        indices(&self.read()).first().copied()
    }

    /// The highest populated list index
    pub fn last(&self) -> Option<u64> {
        indices(&self.read()).last().copied()
    }

    /// The values at a list index
    pub fn get_index(&self, index: u64) -> NodeResult<QueryResult> {
        check_index(index)?;
        Ok(self.get(&index_relation(index)))
    }

    /// The values at the lowest list index, empty if there are none
    pub fn get_first(&self) -> QueryResult {
        self.first()
            .map(|index| self.get(&index_relation(index)))
            .unwrap_or_default()
    }

    /// The values at the highest list index, empty if there are none
    pub fn get_last(&self) -> QueryResult {
        self.last()
            .map(|index| self.get(&index_relation(index)))
            .unwrap_or_default()
    }

    /// One result per list index from [`FIRST_INDEX`] up to the last
    /// index. Holes yield empty results.
    ///
    /// The iterator works on a snapshot of the populated indices and yields
    /// lazily, so a sparse list with a very high last index stays cheap as
    /// long as the caller does not collect all of it.
    pub fn get_enumerated(&self) -> impl Iterator<Item = QueryResult> {
        let mut populated: BTreeMap<u64, QueryResult> = self
            .read()
            .iter()
            .filter_map(|(relation, values)| {
                sequence_number_of(relation).map(|index| (index, values.iter().cloned().collect()))
            })
            .collect();
        let last = populated.keys().next_back().copied().unwrap_or(0);
        (FIRST_INDEX..=last).map(move |index| populated.remove(&index).unwrap_or_default())
    }

    /// Appends a value after the last list index, or at [`FIRST_INDEX`] if
    /// the list is empty.
    pub fn add(&self, value: impl Into<Value>) -> NodeResult<&Self> {
        let mut relations = self.write();
        let index = match indices(&relations).last() {
            None => FIRST_INDEX,
            Some(last) => last
                .checked_add(1)
                .ok_or_else(|| NodeError::NotRepresentable(format!("{} + 1", last)))?,
        };
        relations
            .entry(index_relation(index))
            .or_default()
            .push(value.into());
        Ok(self)
    }

    /// Appends several values
    pub fn add_all<I>(&self, values: I) -> NodeResult<&Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        for value in values {
            self.add(value)?;
        }
        Ok(self)
    }

    /// Inserts a value at a list index. Every element at that index or
    /// above moves up by one.
    pub fn insert(&self, index: u64, value: impl Into<Value>) -> NodeResult<()> {
        check_index(index)?;
        let mut relations = self.write();
        let moving: Vec<u64> = indices(&relations).range(index..).rev().copied().collect();
        if moving.first() == Some(&u64::MAX) {
            return Err(NodeError::NotRepresentable(format!("{} + 1", u64::MAX)));
        }
        for from in moving {
            move_index(&mut relations, from, from + 1);
        }
        relations.insert(index_relation(index), vec![value.into()]);
        Ok(())
    }

    /// Inserts a value at [`FIRST_INDEX`]
    pub fn add_first(&self, value: impl Into<Value>) -> NodeResult<()> {
        self.insert(FIRST_INDEX, value)
    }

    /// Replaces the element at a list index, returning what was there
    pub fn set(&self, index: u64, value: impl Into<Value>) -> NodeResult<Vec<Value>> {
        check_index(index)?;
        Ok(self
            .write()
            .insert(index_relation(index), vec![value.into()])
            .unwrap_or_default())
    }

    /// Makes a plain literal the only list element. Other list elements and
    /// node-shaped children are dropped; literal attributes stay.
    pub fn set_value(&self, text: impl Into<String>) -> &Self {
        let mut relations = self.write();
        relations.retain(|relation, values| {
            if sequence_number_of(relation).is_some() {
                return false;
            }
            values.retain(|value| !value.has(Capability::Node));
            !values.is_empty()
        });
        relations.insert(
            index_relation(FIRST_INDEX),
            vec![Value::Literal(Literal::plain(text))],
        );
        self
    }

    /// Removes the element at the lowest list index. The contiguous run
    /// of elements after it moves down to close the gap.
    pub fn remove_first(&self) -> Vec<Value> {
        let mut relations = self.write();
        let Some(first) = indices(&relations).first().copied() else {
            return Vec::new();
        };
        let removed = relations
            .shift_remove(&index_relation(first))
            .unwrap_or_default();
        let mut next = first + 1;
        while relations.contains_key(&index_relation(next)) {
            move_index(&mut relations, next, next - 1);
            match next.checked_add(1) {
                Some(following) => next = following,
                None => break,
            }
        }
        removed
    }

    /// Removes the element at the highest list index
    pub fn remove_last(&self) -> Vec<Value> {
        let mut relations = self.write();
        match indices(&relations).last() {
            Some(last) => relations
                .shift_remove(&index_relation(*last))
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }

    /// Removes the value from the lowest list index holding it
    pub fn remove_first_occurrence(&self, value: &Value) -> bool {
        let candidates: Vec<u64> = indices(&self.read()).into_iter().collect();
        self.remove_occurrence(candidates.into_iter(), value)
    }

    /// Removes the value from the highest list index holding it
    pub fn remove_last_occurrence(&self, value: &Value) -> bool {
        let candidates: Vec<u64> = indices(&self.read()).into_iter().collect();
        self.remove_occurrence(candidates.into_iter().rev(), value)
    }

    fn remove_occurrence(&self, mut candidates: impl Iterator<Item = u64>, value: &Value) -> bool {
        let hit = candidates.find_map(|index| {
            let relation = index_relation(index);
            let position = self
                .read()
                .get(&relation)?
                .iter()
                .position(|candidate| candidate == value)?;
            Some((relation, position))
        });
        match hit {
            Some((relation, position)) => remove_at(&mut self.write(), &relation, position).is_some(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::rdf::SEQ_NO_PREFIX;

    fn text(result: QueryResult) -> String {
        result.strings_joined(",")
    }

    fn list(items: &[(u64, &str)]) -> Node {
        let node = Node::new();
        for (index, item) in items {
            node.set(*index, Literal::plain(*item)).unwrap();
        }
        node
    }

    #[test]
    fn test_add_to_empty_list() {
        let node = Node::new();
        node.add(Literal::plain("V")).unwrap();

        assert_eq!(node.first(), Some(1));
        assert_eq!(node.last(), Some(1));
        assert_eq!(text(node.get_index(1).unwrap()), "V");
    }

    #[test]
    fn test_add_appends_after_last() {
        let node = list(&[(1, "X"), (3, "Y")]);
        node.add(Literal::plain("V")).unwrap();

        assert_eq!(text(node.get_index(4).unwrap()), "V");
        assert!(node.get_index(2).unwrap().is_empty());
    }

    #[test]
    fn test_insert_shifts_up() {
        let node = list(&[(1, "X"), (2, "Y")]);
        node.insert(1, Literal::plain("Z")).unwrap();

        assert_eq!(text(node.get_index(1).unwrap()), "Z");
        assert_eq!(text(node.get_index(2).unwrap()), "X");
        assert_eq!(text(node.get_index(3).unwrap()), "Y");
    }

    #[test]
    fn test_insert_shifts_every_higher_index() {
        let node = list(&[(1, "X"), (3, "Y")]);
        node.insert(1, Literal::plain("Z")).unwrap();

        assert_eq!(text(node.get_index(2).unwrap()), "X");
        assert!(node.get_index(3).unwrap().is_empty());
        assert_eq!(text(node.get_index(4).unwrap()), "Y");
    }

    #[test]
    fn test_add_first() {
        let node = list(&[(1, "X")]);
        node.add_first(Literal::plain("W")).unwrap();

        assert_eq!(text(node.get_first()), "W");
        assert_eq!(text(node.get_last()), "X");
    }

    #[test]
    fn test_index_out_of_range() {
        let node = Node::new();

        assert_eq!(
            node.insert(0, Literal::plain("x")),
            Err(NodeError::IndexOutOfRange(0))
        );
        assert!(matches!(node.get_index(0), Err(NodeError::IndexOutOfRange(0))));
        assert!(matches!(node.set(0, Literal::plain("x")), Err(NodeError::IndexOutOfRange(0))));
    }

    #[test]
    fn test_add_not_representable() {
        let node = Node::new();
        node.set(u64::MAX, Literal::plain("x")).unwrap();

        assert!(matches!(
            node.add(Literal::plain("y")),
            Err(NodeError::NotRepresentable(_))
        ));
        assert!(matches!(
            node.insert(1, Literal::plain("y")),
            Err(NodeError::NotRepresentable(_))
        ));
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(Node::parse_index(&index_relation(12)), Ok(12));
        assert_eq!(
            Node::parse_index(&index_relation(0)),
            Err(NodeError::IndexOutOfRange(0))
        );
        assert!(matches!(
            Node::parse_index(&format!("{}99999999999999999999", SEQ_NO_PREFIX)),
            Err(NodeError::NotRepresentable(_))
        ));
        assert!(matches!(
            Node::parse_index(&format!("{}abc", SEQ_NO_PREFIX)),
            Err(NodeError::NotAnIndex(_))
        ));
    }

    #[test]
    fn test_first_last_ignore_map_order() {
        let node = list(&[(5, "E"), (2, "B"), (9, "I")]);

        assert_eq!(node.first(), Some(2));
        assert_eq!(node.last(), Some(9));
        assert_eq!(Node::new().first(), None);
    }

    #[test]
    fn test_get_enumerated() {
        let node = list(&[(2, "B"), (3, "C")]);
        let enumerated: Vec<QueryResult> = node.get_enumerated().collect();

        assert_eq!(enumerated.len(), 3);
        assert!(enumerated[0].is_empty());
        assert_eq!(text(enumerated[1].clone()), "B");
        assert_eq!(Node::new().get_enumerated().count(), 0);
    }

    #[test]
    fn test_get_enumerated_far_index() {
        let node = list(&[(1, "A"), (u64::MAX, "Z")]);

        let head: Vec<QueryResult> = node.get_enumerated().take(3).collect();
        assert_eq!(text(head[0].clone()), "A");
        assert!(head[1].is_empty());
        assert!(head[2].is_empty());
    }

    #[test]
    fn test_leading_zero_relation_is_not_an_element() {
        let node = Node::new();
        let padded = format!("{}01", SEQ_NO_PREFIX);
        node.put(padded.clone(), Literal::plain("X"));

        assert_eq!(node.first(), None);
        assert_eq!(node.last(), None);
        assert!(matches!(Node::parse_index(&padded), Err(NodeError::NotAnIndex(_))));
        assert!(node.remove_last().is_empty());

        node.insert(1, Literal::plain("Z")).unwrap();
        node.add(Literal::plain("Y")).unwrap();
        assert_eq!((node.first(), node.last()), (Some(1), Some(2)));
        assert_eq!(text(node.remove_last().into_iter().collect()), "Y");
        assert_eq!(text(node.remove_first().into_iter().collect()), "Z");
        assert_eq!(text(node.get(&padded)), "X");
    }

    #[test]
    fn test_remove_first_closes_gap() {
        let node = list(&[(1, "A"), (2, "B"), (3, "C"), (5, "E")]);
        let removed = node.remove_first();

        assert_eq!(removed, vec![Value::Literal(Literal::plain("A"))]);
        assert_eq!(text(node.get_index(1).unwrap()), "B");
        assert_eq!(text(node.get_index(2).unwrap()), "C");
        assert!(node.get_index(3).unwrap().is_empty());
        assert_eq!(text(node.get_index(5).unwrap()), "E");
    }

    #[test]
    fn test_remove_last() {
        let node = list(&[(1, "A"), (4, "D")]);
        node.remove_last();

        assert_eq!(node.last(), Some(1));
        assert!(Node::new().remove_last().is_empty());
    }

    #[test]
    fn test_remove_occurrences() {
        let node = list(&[(1, "A"), (2, "B"), (3, "A")]);
        let a = Value::Literal(Literal::plain("A"));

        assert!(node.remove_last_occurrence(&a));
        assert_eq!(node.last(), Some(2));
        assert!(node.remove_first_occurrence(&a));
        assert_eq!(node.first(), Some(2));
        assert!(!node.remove_first_occurrence(&a));
    }

    #[test]
    fn test_set_value() {
        let node = Node::with_type("http://example.org/Name");
        node.add(Node::new()).unwrap();
        node.add(Literal::plain("old")).unwrap();
        node.put("http://example.org/part", Node::new());

        node.set_value("Max");

        assert_eq!(node.first(), Some(1));
        assert_eq!(node.last(), Some(1));
        assert_eq!(text(node.get_first()), "Max");
        assert!(node.has_type("http://example.org/Name"));
        assert!(!node.contains_key("http://example.org/part"));
    }
}
