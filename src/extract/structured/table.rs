use crate::extract::Strategy;
use crate::models::{AnswerOption, Mcq, SourceStrategy, MAX_OPTIONS, MIN_OPTIONS};
use crate::tree::{DocumentTree, DynTree, NodeId};

/// 表格策略：第 0 行是题干，其余行是选项
pub struct TableStrategy;

/// 属于该表格本身的行（嵌套表格的行不算）
fn own_rows(tree: &dyn DocumentTree, table: NodeId) -> Vec<NodeId> {
    tree.descendants(table)
        .into_iter()
        .filter(|&n| tree.is_tag(n, "tr"))
        .filter(|&row| {
            tree.parent(row)
                .and_then(|p| tree.closest(p, &|n| tree.is_tag(n, "table")))
                == Some(table)
        })
        .collect()
}

impl Strategy<DynTree> for TableStrategy {
    fn name(&self) -> &str {
        "table"
    }

    fn extract(&self, tree: &DynTree) -> anyhow::Result<Vec<Mcq>> {
        let mut found = Vec::new();

        for table in tree.find_all(&|n| tree.is_tag(n, "table")) {
            let rows = own_rows(tree, table);
            let Some((&head, rest)) = rows.split_first() else {
                continue;
            };
            if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&rest.len()) {
                continue;
            }

            let question = tree.text_content(head);
            let options = rest
                .iter()
                .map(|&row| AnswerOption::from_raw(&tree.text_content(row), Some(row)))
                .collect();

            if let Some(mcq) = Mcq::candidate(&question, Some(head), options, SourceStrategy::Table, None) {
                found.push(mcq);
            }
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{DocTree, El};

    fn row(text: &str) -> El {
        El::new("tr").child(El::new("td").text(text))
    }

    fn table(rows: &[&str]) -> El {
        El::new("table").child(El::new("tbody").children(rows.iter().map(|r| row(r))))
    }

    #[test]
    fn test_first_row_is_question() {
        let tree = DocTree::from_root(table(&["Largest planet?", "a) Earth", "b) Jupiter", "c) Mars"]));
        let found = TableStrategy.extract(&tree as &DynTree).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question, "Largest planet?");
        assert_eq!(found[0].option_texts(), vec!["Earth", "Jupiter", "Mars"]);
        assert_eq!(found[0].source_strategy, SourceStrategy::Table);
    }

    #[test]
    fn test_row_count_bounds() {
        let short = DocTree::from_root(table(&["Question?", "only"]));
        assert!(TableStrategy.extract(&short as &DynTree).unwrap().is_empty());

        let long = DocTree::from_root(table(&["Question?", "1", "2", "3", "4", "5", "6", "7"]));
        assert!(TableStrategy.extract(&long as &DynTree).unwrap().is_empty());
    }

    #[test]
    fn test_nested_table_rows_not_counted_twice() {
        let inner = table(&["Inner question?", "x", "y"]);
        let outer = El::new("table")
            .child(row("Outer question?"))
            .child(El::new("tr").child(El::new("td").child(inner)))
            .child(row("plain option"));
        let tree = DocTree::from_root(outer);

        let found = TableStrategy.extract(&tree as &DynTree).unwrap();
        let questions: Vec<&str> = found.iter().map(|m| m.question.as_str()).collect();
        assert_eq!(questions, vec!["Outer question?", "Inner question?"]);
        assert_eq!(found[0].options.len(), 2);
        assert_eq!(found[1].option_texts(), vec!["x", "y"]);
    }
}
