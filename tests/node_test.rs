use ldgraph::model::{LangString, Literal, NamedNode, Node, NodeError, NodeReference, Value};
use ldgraph::vocab::rdf;
use ldgraph::{MemoryStorage, Storage};

const EX: &str = "http://example.org/";

fn ex(local: &str) -> String {
    format!("{}{}", EX, local)
}

#[test]
fn test_put_is_additive() {
    let node = Node::new();
    let a = Value::from(Literal::plain("a"));
    let b = Value::from(Literal::plain("b"));

    node.put(ex("r"), a.clone());
    node.put(ex("r"), b.clone());

    let values = node.get(&ex("r"));
    assert_eq!(values.len(), 2);
    assert!(values.iter().any(|v| *v == a));
    assert!(values.iter().any(|v| *v == b));
    assert!(node.contains_key(&ex("r")));
}

#[test]
fn test_same_literal_twice() {
    let node = Node::new();
    node.put_literal(ex("r"), "a");
    node.put_literal(ex("r"), "a");
    assert_eq!(node.get(&ex("r")).len(), 2);

    assert!(node.remove(&Value::from(Literal::plain("a"))));
    assert_eq!(node.get(&ex("r")).len(), 1);
}

#[test]
fn test_empty_relation_is_pruned() {
    let node = Node::new();
    let a = Value::from(Literal::plain("a"));
    node.put(ex("r"), a.clone());

    assert!(node.remove(&a));
    assert!(!node.contains_key(&ex("r")));
    assert!(node.is_empty());
    assert!(!node.remove(&a));
}

#[test]
fn test_insert_shifts_up() {
    let node = Node::new();
    node.add(Literal::plain("X")).unwrap();
    node.add(Literal::plain("Y")).unwrap();

    node.insert(1, Literal::plain("Z")).unwrap();

    let texts: Vec<String> = node
        .get_enumerated()
        .map(|result| result.literal().unwrap().value().to_string())
        .collect();
    assert_eq!(texts, vec!["Z", "X", "Y"]);
}

#[test]
fn test_append_after_hole() {
    let node = Node::new();
    node.add(Literal::plain("V")).unwrap();
    assert_eq!(node.first(), Some(1));

    let holey = Node::new();
    holey.put(rdf::index_relation(1), Literal::plain("X"));
    holey.put(rdf::index_relation(3), Literal::plain("Y"));
    holey.add(Literal::plain("V")).unwrap();

    assert_eq!(holey.last(), Some(4));
    assert!(holey.get_index(2).unwrap().is_empty());
    assert_eq!(holey.get_enumerated().count(), 4);
}

#[test]
fn test_remove_first_and_last() {
    let node = Node::new();
    node.add_all(["a", "b", "c"].map(Literal::plain)).unwrap();

    assert_eq!(node.remove_first(), vec![Value::from(Literal::plain("a"))]);
    assert_eq!(node.get_first().literal().unwrap().value(), "b");
    assert_eq!(node.remove_last(), vec![Value::from(Literal::plain("c"))]);
    assert_eq!((node.first(), node.last()), (Some(1), Some(1)));
}

#[test]
fn test_index_errors() {
    let node = Node::new();
    assert!(matches!(node.get_index(0), Err(NodeError::IndexOutOfRange(0))));
    assert!(matches!(node.insert(0, Literal::plain("x")), Err(NodeError::IndexOutOfRange(0))));
    assert!(matches!(
        Node::parse_index(&format!("{}99999999999999999999999", rdf::SEQ_NO_PREFIX)),
        Err(NodeError::NotRepresentable(_))
    ));
}

#[test]
fn test_replace_returns_previous() {
    let node = Node::new();
    node.put_literal(ex("r"), "old");

    let previous = node.replace(&ex("r"), vec![Value::from(Literal::plain("new"))]);
    assert_eq!(previous, vec![Value::from(Literal::plain("old"))]);
    assert_eq!(node.get(&ex("r")).literal().unwrap().value(), "new");

    node.replace(&ex("r"), Vec::<Value>::new());
    assert!(!node.contains_key(&ex("r")));
}

#[test]
fn test_get_type() {
    assert!(matches!(Node::new().get_type(), Err(NodeError::Missing(_))));

    let node = Node::with_type(ex("Book"));
    assert_eq!(node.get_type().unwrap(), ex("Book"));

    node.put_reference(rdf::TYPE, ex("Work"));
    assert!(matches!(node.get_type(), Err(NodeError::Ambiguous(_))));
    assert!(node.has_type(&ex("Work")));
}

#[test]
fn test_typed_and_identified_lookups() {
    let node = Node::new();
    let first = Node::with_type(ex("Agent")).with(ex("id"), Literal::plain("a1"));
    let second = Node::with_type(ex("Agent")).with(ex("id"), Literal::plain("a2"));
    let title = Node::with_type(ex("Title"));
    node.put(ex("agent"), first.clone());
    node.put(ex("agent"), second.clone());
    node.put(ex("title"), title.clone());

    assert_eq!(node.get_typed(&ex("agent"), &ex("Agent")).len(), 2);
    assert_eq!(node.get_typed(&ex("agent"), &ex("Title")).len(), 0);
    assert_eq!(
        node.get_identified(&ex("agent"), &ex("id"), "a2").node().unwrap(),
        second
    );
    assert_eq!(node.get_by_type(&ex("Agent")).len(), 2);
    assert_eq!(node.get_by_type(&ex("Title")).node().unwrap(), title);
    assert_eq!(node.get(ldgraph::ANY_RELATION).len(), 3);
}

#[test]
fn test_get_by_type_across_relations() {
    let node = Node::new();
    let author = Node::with_type(ex("Agent"));
    let editor = Node::with_type(ex("Agent"));
    let title = Node::with_type(ex("Title"));
    node.put(ex("author"), author.clone());
    node.put(ex("editor"), editor.clone());
    node.put(ex("editor"), title);
    node.put_literal(ex("note"), "Agent");

    let agents = node.get_by_type(&ex("Agent")).nodes();
    assert_eq!(agents.len(), 2);
    assert!(agents.iter().any(|agent| agent.ptr_eq(&author)));
    assert!(agents.iter().any(|agent| agent.ptr_eq(&editor)));
}

#[test]
fn test_get_by_identifier() {
    let root = Node::new();
    let child = Node::new();
    let target = NamedNode::new(ex("x"));
    child.put(ex("part"), target.clone());
    root.put(ex("part"), child);

    assert_eq!(root.get_by_identifier(&ex("x")).unwrap(), Value::from(target));
    assert!(matches!(root.get_by_identifier(&ex("y")), Err(NodeError::Missing(_))));

    root.put(ex("other"), NamedNode::new(ex("x")).with(ex("p"), Literal::plain("q")));
    assert!(matches!(root.get_by_identifier(&ex("x")), Err(NodeError::Ambiguous(_))));
}

#[test]
fn test_matches_condition() {
    let node = Node::with_type(ex("Book")).with(ex("title"), Literal::plain("Moby Dick"));
    node.put(ex("lang"), LangString::new("Moby Dick", "en"));

    assert!(node.matches(None));
    assert!(node.matches(Some(&Value::from(Node::with_type(ex("Book"))))));
    assert!(!node.matches(Some(&Value::from(Node::with_type(ex("Film"))))));
    assert!(Value::from(NodeReference::new(ex("x"))).matches(None));
    assert!(Value::from(Literal::plain("x")).matches(None));
}

#[test]
fn test_iterator_skips_literals() {
    let node = Node::new();
    node.put_literal(ex("r"), "a");
    node.put(ex("r"), Node::new());
    node.put(ex("s"), NamedNode::new(ex("n")));

    assert_eq!(node.iter().count(), 2);
    assert_eq!(node.size(), 3);
    assert_eq!(node.len(), 2);
}

#[test]
fn test_shared_handles() {
    let storage = MemoryStorage::new();
    let shared = storage.create_node();
    let parent_a = storage.create_node();
    let parent_b = storage.create_node();
    parent_a.put(ex("child"), shared.clone());
    parent_b.put(ex("child"), shared.clone());

    shared.put_literal(ex("name"), "shared");

    let seen = parent_b.get(&ex("child")).node().unwrap();
    assert!(seen.ptr_eq(&parent_a.get(&ex("child")).node().unwrap()));
    assert_eq!(seen.get(&ex("name")).literal().unwrap().value(), "shared");
}

#[test]
fn test_as_unordered() {
    let node = Node::new();
    let title = Node::with_type(ex("Title"));
    title.put_literal(ex("text"), "Moby Dick");
    node.add(title.clone()).unwrap();

    let kept = node.as_unordered(false);
    assert_eq!(kept.as_node().unwrap().get(&ex("Title")).node().unwrap(), title);

    let stripped = node.as_unordered(true);
    let child = stripped.as_node().unwrap().get(&ex("Title")).node().unwrap();
    assert!(!child.contains_key(rdf::TYPE));
    assert!(child.contains_key(&ex("text")));
}
