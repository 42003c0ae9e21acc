use collection_json::{parse_collection, Property, Target, TargetError, Value};
use serde_json::json;

fn losers() -> Vec<Property> {
    vec![
        Property::scalar("per", "loser", None),
        Property::scalar("paal", "loser", None),
        Property::scalar("espen", "winner", None),
    ]
}

#[test]
fn literal_expansion_matrix() {
    let cases: Vec<(&str, Vec<Property>, &str)> = vec![
        (
            "http://example.com/foo",
            losers(),
            "http://example.com/foo?per=loser&paal=loser&espen=winner",
        ),
        (
            "http://example.com/foo?baa=foo",
            losers(),
            "http://example.com/foo?baa=foo&per=loser&paal=loser&espen=winner",
        ),
        (
            "http://example.com/foo",
            vec![Property::scalar("per", "big brother", None)],
            "http://example.com/foo?per=big+brother",
        ),
        (
            "/relative",
            vec![
                Property::scalar("n", 42, None),
                Property::scalar("b", false, None),
            ],
            "/relative?n=42&b=false",
        ),
        (
            "/frag#top",
            vec![Property::array("t", ["a", "b"], None)],
            "/frag?t=a&t=b#top",
        ),
        ("/none", vec![Property::placeholder("q", None)], "/none"),
        (
            "/nulls",
            vec![Property::array("t", [Value::Null, Value::from("x")], None)],
            "/nulls?t=x",
        ),
    ];

    for (href, props, expected) in cases {
        let target = Target::literal(href).expect("literal target must parse");
        let expanded = target.expand(&props).expect("literal expansion must succeed");
        assert_eq!(expanded.as_str(), expected, "{href}");
    }
}

#[test]
fn template_expansion_matrix() {
    let cases: Vec<(&str, Vec<Property>, &str)> = vec![
        (
            "http://example.com{/foo}",
            vec![Property::scalar("foo", 124567, None)],
            "http://example.com/124567",
        ),
        ("http://example.com{/foo}", vec![], "http://example.com"),
        (
            "http://example.com/{who}",
            vec![Property::scalar("who", "fred", None)],
            "http://example.com/fred",
        ),
        (
            "http://example.com/search{?q,lang}",
            vec![
                Property::scalar("q", "cat", None),
                Property::scalar("lang", "en", None),
            ],
            "http://example.com/search?q=cat&lang=en",
        ),
        (
            "http://example.com/path{/list*}",
            vec![Property::array("list", ["red", "green"], None)],
            "http://example.com/path/red/green",
        ),
        (
            "http://example.com/{+rest}",
            vec![Property::scalar("rest", "a/b", None)],
            "http://example.com/a/b",
        ),
    ];

    for (template, props, expected) in cases {
        let target = Target::template(template).expect("template target must parse");
        let expanded = target.expand(&props).expect("template expansion must succeed");
        assert_eq!(expanded.as_str(), expected, "{template}");
    }
}

#[test]
fn object_property_on_literal_target_fails() {
    let target = Target::literal("http://example.com/").expect("literal");
    let err = target
        .expand(&[Property::object("pos", [("lat", 1)], None)])
        .expect_err("object payload cannot be form encoded");
    assert_eq!(err, TargetError::ObjectProperty("pos".into()));
}

#[test]
fn malformed_templates_fail_at_construction() {
    for bad in ["http://example.com{/foo", "http://example.com/{fo o}", "{"] {
        assert!(
            matches!(Target::template(bad), Err(TargetError::InvalidTemplate { .. })),
            "{bad}"
        );
    }
}

#[test]
fn parsed_template_query_expands() {
    let doc = json!({
        "collection": {
            "version": "1.0",
            "queries": [{
                "href": "http://example.org/friends{?name}",
                "encoding": "uri-template",
                "rel": "search",
                "data": [{"name": "name"}]
            }]
        }
    });
    let collection = parse_collection(&doc.to_string()).expect("document must parse");
    let query = collection.query_by_rel("search").expect("query");
    assert!(query.target().is_template());
    assert_eq!(
        query.to_uri().expect("bare expansion").as_str(),
        "http://example.org/friends"
    );
    assert_eq!(
        query
            .resolve(&[Property::scalar("name", "J. Doe", None)])
            .expect("expansion")
            .as_str(),
        "http://example.org/friends?name=J.%20Doe"
    );
}
