//! Output formatting for trees, networks and query results

use crate::automaton::TransitionNetwork;
use crate::error::Result;
use crate::index::suffix_tree::{NodeId, NodePosition, SuffixTree};
use crate::index::walker::{walk, TreeListener};
use crate::index::TreeStats;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Print the suffix tree as an indented outline
pub fn print_tree(tree: &SuffixTree, color: bool) -> Result<()> {
    write_tree(&mut stdout(color), tree)
}

/// Print states and their labelled transitions
pub fn print_network(network: &TransitionNetwork, color: bool) -> Result<()> {
    write_network(&mut stdout(color), network)
}

/// Print every occurrence of a pattern as `text:offset`
pub fn print_occurrences(tree: &SuffixTree, positions: &[NodePosition], color: bool) -> Result<()> {
    write_occurrences(&mut stdout(color), tree, positions)
}

/// Print tree statistics
pub fn print_stats(stats: &TreeStats) -> Result<()> {
    let mut out = stdout(false);
    writeln!(out, "Suffix Tree Statistics")?;
    writeln!(out, "======================")?;
    writeln!(out)?;
    writeln!(out, "Texts:            {}", stats.text_count)?;
    writeln!(out, "Characters:       {}", stats.text_len)?;
    writeln!(out, "Nodes:            {}", stats.node_count)?;
    writeln!(out, "  Internal:       {}", stats.internal_count)?;
    writeln!(out, "  Leaves:         {}", stats.leaf_count)?;
    writeln!(out, "  Shared leaves:  {}", stats.shared_leaf_count)?;
    writeln!(out, "Max depth:        {}", stats.max_depth)?;
    writeln!(out, "Max path length:  {}", stats.max_path_len)?;
    Ok(())
}

struct TreePrinter<'a, W: WriteColor> {
    out: &'a mut W,
    tree: &'a SuffixTree,
}

impl<W: WriteColor> TreeListener for TreePrinter<'_, W> {
    fn enter(&mut self, node: NodeId, depth: usize, _path_len: usize) -> Result<()> {
        let n = self.tree.get_node(node)?;
        write!(self.out, "{:1$}", "", depth * 2)?;

        if n.is_root() {
            writeln!(self.out, "(root)")?;
            return Ok(());
        }

        let label: String = self.tree.edge_label(node)?.iter().collect();
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        write!(self.out, "\"{}\"", label)?;
        self.out.reset()?;

        if n.is_terminal() {
            let positions: Vec<String> = n
                .positions()
                .iter()
                .map(|p| format!("{}:{}", p.text_index, p.start))
                .collect();
            self.out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
            writeln!(self.out, " (leaf {}, {})", node, positions.join(" "))?;
        } else {
            self.out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            let link = n.suffix_link().map_or_else(|| "-".to_string(), |l| l.to_string());
            writeln!(self.out, " (inner {}, suffix={})", node, link)?;
        }
        self.out.reset()?;
        Ok(())
    }

    fn exit(&mut self, _node: NodeId, _depth: usize, _path_len: usize) -> Result<()> {
        Ok(())
    }
}

pub fn write_tree<W: WriteColor>(out: &mut W, tree: &SuffixTree) -> Result<()> {
    let mut printer = TreePrinter { out, tree };
    walk(tree, &mut printer)
}

pub fn write_network<W: WriteColor>(out: &mut W, network: &TransitionNetwork) -> Result<()> {
    for (index, state) in network.states().iter().enumerate() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        write!(out, "s{}", index)?;
        out.reset()?;
        writeln!(out, " (node {})", state.origin_node)?;

        for transition in &state.transitions {
            let label = network.label(transition.to_suffix)?;
            write!(out, "  --")?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(out, "\"{}\"", label)?;
            out.reset()?;
            writeln!(out, "--> s{}", transition.to_state)?;
        }
    }
    Ok(())
}

pub fn write_occurrences<W: WriteColor>(
    out: &mut W,
    tree: &SuffixTree,
    positions: &[NodePosition],
) -> Result<()> {
    let mut sorted: Vec<(usize, usize)> = positions
        .iter()
        .map(|p| Ok((p.text_index, p.start - tree.text_begin(p.text_index)?)))
        .collect::<Result<_>>()?;
    sorted.sort_unstable();

    for (text_index, offset) in sorted {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", text_index)?;
        out.reset()?;
        write!(out, ":")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(out, "{}", offset)?;
        out.reset()?;
    }
    Ok(())
}
