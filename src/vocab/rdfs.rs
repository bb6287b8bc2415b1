//! Terms of the RDF schema namespace

pub const NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";

pub const CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
pub const CONTAINER: &str = "http://www.w3.org/2000/01/rdf-schema#Container";
pub const CONTAINER_MEMBERSHIP_PROPERTY: &str =
    "http://www.w3.org/2000/01/rdf-schema#ContainerMembershipProperty";
pub const DATATYPE: &str = "http://www.w3.org/2000/01/rdf-schema#Datatype";
pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
pub const IS_DEFINED_BY: &str = "http://www.w3.org/2000/01/rdf-schema#isDefinedBy";
pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const LITERAL: &str = "http://www.w3.org/2000/01/rdf-schema#Literal";
pub const MEMBER: &str = "http://www.w3.org/2000/01/rdf-schema#member";
pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
pub const RESOURCE: &str = "http://www.w3.org/2000/01/rdf-schema#Resource";
pub const SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
