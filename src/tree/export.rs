//! Writes a [`TreeModel`] out as Graphviz or as a C++ header.
use super::model::{TreeModel, ROOT};
use super::node::*;

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;


/// A step of the C++ writer.
enum Emit {
    Node(NodeId, usize),
    Else(usize),
    Close(usize),
}


impl TreeModel {
    /// Write the current decision tree to dot file.
    #[inline]
    pub fn to_dot_file<P>(&self, path: P) -> std::io::Result<()>
        where P: AsRef<Path>
    {
        let mut f = File::create(path)?;
        f.write_all(self.dot_source().as_bytes())?;
        Ok(())
    }


    /// Returns the Graphviz description of the tree.
    /// Graphviz node `node_i` is arena node `i`.
    pub fn dot_source(&self) -> String {
        let mut dot = String::from("graph DecisionTree {\n");
        for (id, node) in self.nodes().iter().enumerate() {
            dot.push_str(&self.dot_info(id, node));
        }
        dot.push_str("}\n");
        dot
    }


    fn dot_info(&self, id: NodeId, node: &Node) -> String {
        match *node {
            Node::Branch { splitter, left, right } => {
                let feature = &self.feature_names()[splitter.feature];
                format!(
                    "\tnode_{id} [ label = \"{feature} <= {thr:?} ?\" ];\n\
                     \tnode_{id} -- node_{left} [ label = \"Yes\" ];\n\
                     \tnode_{id} -- node_{right} [ label = \"No\" ];\n",
                    thr = splitter.threshold,
                )
            },
            Node::Leaf { class } => {
                let label = &self.class_names()[class];
                format!("\tnode_{id} [ label = \"{label}\", shape = box ];\n")
            },
        }
    }


    /// Write the tree as a self-contained inline C++ function
    /// `int function_name(const std::vector<double> &)`.
    pub fn to_cpp_header<P>(&self, path: P, function_name: &str)
        -> std::io::Result<()>
        where P: AsRef<Path>
    {
        let mut f = File::create(path)?;
        f.write_all(self.cpp_source(function_name).as_bytes())?;
        Ok(())
    }


    /// Returns the C++ source written by [`TreeModel::to_cpp_header`].
    /// Out-of-range accesses throw, since features are read with `at`.
    pub fn cpp_source(&self, function_name: &str) -> String {
        let mut src = format!(
            "/*\nDecision tree {} generated by minitrees.\n\
             \nIt takes feature vector as single argument:\n",
            self.name(),
        );
        for (i, name) in self.feature_names().iter().enumerate() {
            src.push_str(&format!("feature_vector[{i}] - {name}\n"));
        }
        src.push_str("\nIt returns index of predicted class:\n");
        for (i, name) in self.class_names().iter().enumerate() {
            src.push_str(&format!("{i} - {name}\n"));
        }
        src.push_str("*/\n\n#include <vector>\n\n");
        src.push_str(&format!(
            "inline int {function_name}(const std::vector<double> & feature_vector)\n{{\n"
        ));

        let mut stack = vec![Emit::Node(ROOT, 1)];
        while let Some(step) = stack.pop() {
            match step {
                Emit::Node(id, depth) => {
                    let indent = "\t".repeat(depth);
                    match self.nodes()[id] {
                        Node::Branch { splitter, left, right } => {
                            src.push_str(&format!(
                                "{indent}if (feature_vector.at({feat}) <= {thr:?}) {{\n",
                                feat = splitter.feature,
                                thr  = splitter.threshold,
                            ));
                            stack.push(Emit::Close(depth));
                            stack.push(Emit::Node(right, depth + 1));
                            stack.push(Emit::Else(depth));
                            stack.push(Emit::Node(left, depth + 1));
                        },
                        Node::Leaf { class } => {
                            src.push_str(&format!("{indent}return {class};\n"));
                        },
                    }
                },
                Emit::Else(depth) => {
                    let indent = "\t".repeat(depth);
                    src.push_str(&format!("{indent}}}\n{indent}else {{\n"));
                },
                Emit::Close(depth) => {
                    let indent = "\t".repeat(depth);
                    src.push_str(&format!("{indent}}}\n"));
                },
            }
        }
        src.push_str("}\n");
        src
    }
}
