pub mod build;
pub mod predict;
pub mod render;
pub mod tree;

pub use build::{build, TreeBuilder};
pub use predict::predict;
pub use render::render;

// Unit-testing
#[cfg(test)]
mod tests {

    use crate::config::DecisionTreeConfig;
    use crate::data::{Dataset, Row};
    use crate::errors::DecisionTreeError;
    use crate::metric::accuracy;
    use crate::node::Node;
    use crate::tree::build::{SplitEvent, SplitOutcome};
    use crate::tree::tree::DecisionTree;
    use crate::utils::precision_round;
    use std::error::Error;
    use std::sync::Mutex;

    // Mitchell's play tennis data.
    const OUTLOOK: [&str; 14] = [
        "sunny", "sunny", "overcast", "rain", "rain", "rain", "overcast", "sunny", "sunny", "rain", "sunny", "overcast",
        "overcast", "rain",
    ];
    const TEMPERATURE: [&str; 14] = [
        "hot", "hot", "hot", "mild", "cool", "cool", "cool", "mild", "cool", "mild", "mild", "mild", "hot", "mild",
    ];
    const HUMIDITY: [&str; 14] = [
        "high", "high", "high", "high", "normal", "normal", "normal", "high", "normal", "normal", "normal", "high",
        "normal", "high",
    ];
    const WIND: [&str; 14] = [
        "weak", "strong", "weak", "weak", "weak", "strong", "strong", "weak", "weak", "weak", "strong", "strong",
        "weak", "strong",
    ];
    const PLAY: [&str; 14] = [
        "no", "no", "yes", "yes", "yes", "no", "yes", "no", "yes", "yes", "yes", "yes", "yes", "no",
    ];

    fn tennis() -> Dataset<String, String> {
        let column = |c: &[&str]| c.iter().map(|v| v.to_string()).collect::<Vec<String>>();
        Dataset::from_columns(
            vec![
                ("outlook".to_string(), column(&OUTLOOK)),
                ("temperature".to_string(), column(&TEMPERATURE)),
                ("humidity".to_string(), column(&HUMIDITY)),
                ("wind".to_string(), column(&WIND)),
            ],
            column(&PLAY),
        )
        .unwrap()
    }

    fn example(pairs: &[(&str, &str)]) -> Row<String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_tree_fit() -> Result<(), Box<dyn Error>> {
        let data = tennis();
        let mut tree = DecisionTree::default();
        tree.fit(&data)?;

        let root = tree.root()?;
        assert_eq!(root.feature(), Some("outlook"));
        assert_eq!(root.get_child(&"overcast".to_string()).unwrap(), &Node::Leaf { label: "yes".to_string() });
        assert_eq!(root.get_child(&"sunny".to_string()).unwrap().feature(), Some("humidity"));
        assert_eq!(root.get_child(&"rain".to_string()).unwrap().feature(), Some("wind"));
        assert_eq!(tree.depth, 2);
        assert_eq!(tree.n_leaves, 5);
        assert_eq!(tree.n_nodes(), 8);
        assert_eq!(tree.features.len(), 4);

        let predictions = tree.predict_dataset(&data)?;
        assert_eq!(accuracy(data.labels(), &predictions)?, 1.0);

        let e = example(&[("outlook", "sunny"), ("temperature", "cool"), ("humidity", "high"), ("wind", "strong")]);
        assert_eq!(tree.predict(&e)?, "no");
        assert_eq!(tree.predict(&e)?, "no");
        Ok(())
    }

    #[test]
    fn test_tree_render() -> Result<(), Box<dyn Error>> {
        let mut tree = DecisionTree::default();
        tree.fit(&tennis())?;
        let expected = "outlook \n     overcast yes\n     rain wind \n         strong no\n         weak yes\n     sunny humidity \n         high no\n         normal yes\n";
        assert_eq!(tree.render()?, expected);
        assert_eq!(tree.to_string(), expected);
        Ok(())
    }

    #[test]
    fn test_tree_deterministic() -> Result<(), Box<dyn Error>> {
        let data = tennis();
        let mut first = DecisionTree::default();
        first.fit(&data)?;
        let mut second = DecisionTree::default();
        second.fit(&data)?;
        assert_eq!(first, second);

        let mut parallel = DecisionTree::default().set_parallel(true).set_num_threads(Some(2));
        parallel.fit(&data)?;
        assert_eq!(first.root()?, parallel.root()?);
        Ok(())
    }

    #[test]
    fn test_tree_unseen_value() -> Result<(), Box<dyn Error>> {
        let mut tree = DecisionTree::default();
        tree.fit(&tennis())?;
        let e = example(&[("outlook", "snow"), ("humidity", "high"), ("wind", "weak")]);
        assert_eq!(
            tree.predict(&e).unwrap_err(),
            DecisionTreeError::KeyMissing("outlook".to_string(), "snow".to_string())
        );
        let rows = vec![
            e,
            example(&[("outlook", "rain"), ("wind", "weak")]),
            example(&[("outlook", "rain")]),
        ];
        let res = tree.predict_rows(&rows);
        assert!(res[0].is_err());
        assert_eq!(res[1], Ok("yes".to_string()));
        assert_eq!(res[2], Err(DecisionTreeError::MissingExampleFeature("wind".to_string())));
        Ok(())
    }

    #[test]
    fn test_tree_not_fitted() {
        let tree: DecisionTree<String, String> = DecisionTree::default();
        assert!(!tree.is_fitted());
        assert_eq!(tree.predict(&example(&[])).unwrap_err(), DecisionTreeError::NotFitted);
        assert_eq!(tree.render().unwrap_err(), DecisionTreeError::NotFitted);
        assert_eq!(tree.predict_dataset(&tennis()).unwrap_err(), DecisionTreeError::NotFitted);
        assert_eq!(tree.n_nodes(), 0);
        assert_eq!(tree.to_string(), "DecisionTree (not fitted)");
    }

    #[test]
    fn test_tree_fit_failure_keeps_previous() -> Result<(), Box<dyn Error>> {
        let mut tree = DecisionTree::default();
        tree.fit(&tennis())?;
        let empty: Dataset<String, String> = Dataset::from_columns(vec![("outlook".to_string(), vec![])], vec![])?;
        assert_eq!(tree.fit(&empty).unwrap_err(), DecisionTreeError::EmptyInput);
        assert_eq!(tree.root()?.feature(), Some("outlook"));
        assert_eq!(tree.n_leaves, 5);
        Ok(())
    }

    #[test]
    fn test_tree_invalid_threads() {
        let res = DecisionTree::<String, String>::new(DecisionTreeConfig {
            num_threads: Some(0),
            ..Default::default()
        });
        assert!(matches!(res, Err(DecisionTreeError::InvalidParameter(..))));

        let mut tree = DecisionTree::default().set_parallel(true).set_num_threads(Some(0));
        assert!(matches!(tree.fit(&tennis()), Err(DecisionTreeError::InvalidParameter(..))));
    }

    #[test]
    fn test_tree_feature_importance() -> Result<(), Box<dyn Error>> {
        let mut tree = DecisionTree::default();
        tree.fit(&tennis())?;
        let importance = tree.feature_importance()?;
        assert_eq!(importance.len(), 3);
        assert!(!importance.contains_key("temperature"));
        let total: f64 = importance.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
        // Both second level splits separate 5 rows perfectly.
        assert!((importance["wind"] - importance["humidity"]).abs() < 1e-9);
        assert_eq!(precision_round(importance["outlook"], 3), 0.262);

        let mut stump = DecisionTree::default();
        let pure = Dataset::from_columns(
            vec![("outlook".to_string(), vec!["sunny".to_string()])],
            vec!["yes".to_string()],
        )?;
        stump.fit(&pure)?;
        assert!(stump.feature_importance()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_tree_trace() -> Result<(), Box<dyn Error>> {
        let events: Mutex<Vec<(usize, String, SplitOutcome)>> = Mutex::new(Vec::new());
        let trace = |e: &SplitEvent| {
            if let Ok(mut ev) = events.lock() {
                ev.push((e.depth, e.feature.unwrap_or_default().to_string(), e.outcome));
            }
        };
        let mut tree = DecisionTree::default();
        tree.fit_with_trace(&tennis(), &trace)?;
        let events = events.into_inner()?;
        assert_eq!(
            events,
            vec![
                (0, "outlook".to_string(), SplitOutcome::Branch(3)),
                (1, "wind".to_string(), SplitOutcome::Branch(2)),
                (1, "humidity".to_string(), SplitOutcome::Branch(2)),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_tree_json() -> Result<(), Box<dyn Error>> {
        let mut tree = DecisionTree::default().set_split_last_feature(false);
        tree.fit(&tennis())?;
        let json = tree.json_dump()?;
        let loaded = DecisionTree::<String, String>::from_json(&json)?;
        assert_eq!(loaded, tree);
        assert!(!loaded.cfg.split_last_feature);

        let res = DecisionTree::<String, String>::from_json("{\"cfg\": 1}");
        assert!(matches!(res, Err(DecisionTreeError::UnableToRead(_))));
        Ok(())
    }

    #[test]
    fn test_tree_save_load() -> Result<(), Box<dyn Error>> {
        let mut tree = DecisionTree::default();
        tree.fit(&tennis())?;
        let path = std::env::temp_dir().join("arbor_test_tree_save_load.json");
        let path = path.to_str().ok_or("temp path is not valid unicode")?;
        tree.save_tree(path)?;
        let loaded = DecisionTree::<String, String>::load_tree(path)?;
        std::fs::remove_file(path)?;
        assert_eq!(loaded.render()?, tree.render()?);

        let res = DecisionTree::<String, String>::load_tree("no/such/dir/tree.json");
        assert!(matches!(res, Err(DecisionTreeError::UnableToRead(_))));
        Ok(())
    }
}
