//! Coset enumeration over a rank-4 Coxeter presentation
//!
//! HLT-style Todd-Coxeter: the group is built as the quotient of the free
//! group on four involutive generators by the six pair relators. Vertices
//! of the enumeration live in a slotmap arena and are threaded onto an
//! insertion-ordered doubly-linked list of keys; equivalence classes are
//! tracked union-find style through a `rep` field, and vertices scheduled
//! for deletion are parked just before the tail sentinel, where they double
//! as the propagation worklist.

use std::fmt;

use slotmap::{new_key_type, SecondaryMap, SlotMap};

use crate::words::{Word, RANK};

new_key_type! {
    struct NodeKey;
}

/// One enumeration vertex: a candidate group element.
struct Node {
    /// Generator adjacency; edges are always created as mutual pairs.
    adj: [Option<NodeKey>; RANK],
    /// Union-find representative; equals the node's own key while live.
    rep: NodeKey,
    /// Bitmask of relators already traced through this vertex.
    traced: u32,
    prev: NodeKey,
    next: NodeKey,
}

/// Enumeration failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupError {
    /// The vertex arena outgrew the configured bound before closing.
    /// Either the presentation describes an infinite group or the bound
    /// is too small for it.
    TooManyVertices { limit: usize },
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupError::TooManyVertices { limit } => {
                write!(f, "coset enumeration exceeded {} vertices", limit)
            }
        }
    }
}

impl std::error::Error for GroupError {}

/// A finite group presented by relator words over four involutive
/// generators, tabulated for O(1) multiplication.
pub struct Group {
    ord: usize,
    /// Left-multiplication table: `left[g][j] = s_j * g`
    left: Vec<[usize; RANK]>,
    /// Inverse table
    inv: Vec<usize>,
    /// Generator that first reached each element in the BFS from the
    /// identity; `None` for the identity itself.
    whence: Vec<Option<usize>>,
}

impl Group {
    /// Enumerate the group presented by `relators`.
    ///
    /// Always terminates for a genuine finite Coxeter system. A malformed
    /// presentation (or one describing an infinite group) grows without
    /// bound until allocation fails and the process aborts; use
    /// [`Group::enumerate_bounded`] to turn that into an error instead.
    pub fn enumerate(relators: &[Word]) -> Group {
        match Self::build(relators, None) {
            Ok(group) => group,
            Err(_) => unreachable!("unbounded enumeration cannot hit a vertex limit"),
        }
    }

    /// Enumerate with a cap on live enumeration vertices.
    pub fn enumerate_bounded(relators: &[Word], node_limit: usize) -> Result<Group, GroupError> {
        Self::build(relators, Some(node_limit))
    }

    fn build(relators: &[Word], node_limit: Option<usize>) -> Result<Group, GroupError> {
        assert!(
            relators.len() <= 32,
            "relator bitmask supports at most 32 relators, got {}",
            relators.len()
        );

        let mut arena = Arena::new(node_limit)?;
        arena.close(relators)?;
        log::debug!("free graph closed, order = {}", arena.live_count());

        let (left, ord) = arena.into_left_table();
        log::debug!("left multiplication table built");

        // breadth-first from the identity, recording the generator that
        // first reaches each element
        let mut whence: Vec<Option<usize>> = vec![None; ord];
        let mut seen = vec![false; ord];
        let mut reached = Vec::with_capacity(ord);
        let mut largest = 0;
        seen[0] = true;
        reached.push(0);
        let mut i = 0;
        while i < reached.len() {
            let v = reached[i];
            for (j, &g) in left[v].iter().enumerate() {
                if !seen[g] {
                    seen[g] = true;
                    whence[g] = Some(j);
                    largest = g;
                    reached.push(g);
                }
            }
            i += 1;
        }

        // invert by walking whence chains back to the identity, composing
        // the same chain forward from the identity; each trace fills both
        // g and its inverse
        let mut inv = vec![usize::MAX; ord];
        for g in 0..ord {
            if inv[g] != usize::MAX {
                continue;
            }
            let mut g1 = g;
            let mut g1_inv = 0;
            while g1 != 0 {
                let j = whence[g1].expect("whence chain broken before the identity");
                g1_inv = left[g1_inv][j];
                g1 = left[g1][j];
            }
            inv[g] = g1_inv;
            inv[g1_inv] = g;
        }
        log::debug!("inverse table built");

        let group = Group { ord, left, inv, whence };
        log::debug!("largest element = {:?}", group.parse(largest));
        Ok(group)
    }

    /// Number of group elements
    #[inline]
    pub fn order(&self) -> usize {
        self.ord
    }

    /// Left multiplication by one generator: `s_j * g`
    #[inline]
    pub fn left(&self, g: usize, j: usize) -> usize {
        self.left[g][j]
    }

    /// Left multiplication by a word, letters applied in order
    pub fn left_word(&self, g: usize, word: &[usize]) -> usize {
        let mut g = g;
        for &j in word {
            g = self.left(g, j);
        }
        g
    }

    /// Right multiplication by one generator: `g * s_j`, derived from the
    /// left table through the inverse: `(s_j * g^-1)^-1`.
    #[inline]
    pub fn right(&self, g: usize, j: usize) -> usize {
        self.inv[self.left[self.inv[g]][j]]
    }

    /// Right multiplication by a word, letters applied in reverse so the
    /// product reads left to right
    pub fn right_word(&self, g: usize, word: &[usize]) -> usize {
        let mut g = g;
        for &j in word.iter().rev() {
            g = self.right(g, j);
        }
        g
    }

    /// Inverse of an element
    #[inline]
    pub fn inverse(&self, g: usize) -> usize {
        self.inv[g]
    }

    /// Shortest discovered word equal to `g`, read as letters applied by
    /// [`Group::left_word`] to the identity.
    pub fn parse(&self, g: usize) -> Word {
        let mut result = Word::new();
        let mut v = self.inv[g];
        while let Some(j) = self.whence[v] {
            result.push(j);
            v = self.left(v, j);
        }
        result
    }
}

/// The working state of one enumeration run.
struct Arena {
    nodes: SlotMap<NodeKey, Node>,
    /// Head sentinel; `head.next` is the identity seed.
    head: NodeKey,
    /// Tail sentinel; dead vertices are parked just before it.
    tail: NodeKey,
    node_limit: Option<usize>,
}

impl Arena {
    fn new(node_limit: Option<usize>) -> Result<Arena, GroupError> {
        let mut nodes = SlotMap::with_key();
        let head = nodes.insert_with_key(|k| Node {
            adj: [None; RANK],
            rep: k,
            traced: 0,
            prev: k,
            next: k,
        });
        let tail = nodes.insert_with_key(|k| Node {
            adj: [None; RANK],
            rep: k,
            traced: 0,
            prev: k,
            next: k,
        });
        nodes[head].next = tail;
        nodes[tail].prev = head;
        let mut arena = Arena { nodes, head, tail, node_limit };
        // seed vertex: the identity; a zero limit fails here already
        arena.create_node()?;
        Ok(arena)
    }

    /// Insert a fresh vertex just before the tail sentinel.
    fn create_node(&mut self) -> Result<NodeKey, GroupError> {
        if let Some(limit) = self.node_limit {
            // two of the slots are sentinels
            if self.nodes.len() - 2 >= limit {
                return Err(GroupError::TooManyVertices { limit });
            }
        }
        let tail = self.tail;
        let prev = self.nodes[tail].prev;
        let k = self.nodes.insert_with_key(|k| Node {
            adj: [None; RANK],
            rep: k,
            traced: 0,
            prev,
            next: tail,
        });
        self.nodes[prev].next = k;
        self.nodes[tail].prev = k;
        Ok(k)
    }

    fn live_count(&self) -> usize {
        self.nodes.len() - 2
    }

    /// Trace every relator through every vertex, creating generator edges
    /// on demand and merging vertices the relators force equal. A single
    /// pass over the growing list reaches the fixed point: vertices
    /// appended or re-parked during the pass are themselves visited before
    /// the cursor reaches the tail.
    fn close(&mut self, relators: &[Word]) -> Result<(), GroupError> {
        let mut v = self.nodes[self.head].next;
        while v != self.tail {
            for (w, word) in relators.iter().enumerate() {
                if self.nodes[v].traced & (1 << w) != 0 {
                    continue;
                }
                let mut cur = v;
                for &j in word {
                    if self.nodes[cur].adj[j].is_none() {
                        let fresh = self.create_node()?;
                        self.nodes[cur].adj[j] = Some(fresh);
                        self.nodes[fresh].adj[j] = Some(cur);
                    }
                    self.nodes[cur].traced |= 1 << w;
                    cur = self.nodes[cur].adj[j].expect("edge was just created");
                }
                // the relator demands word(v) = v; if the walk ended on a
                // different vertex the two are the same group element
                self.merge(v, cur);
            }
            v = self.nodes[v].next;
        }
        Ok(())
    }

    /// One-step path compression; returns the representative.
    fn rep_of(&mut self, k: NodeKey) -> NodeKey {
        let mut r = self.nodes[k].rep;
        while r != self.nodes[r].rep {
            r = self.nodes[r].rep;
        }
        self.nodes[k].rep = r;
        r
    }

    /// Unlink `k` and re-insert it immediately before `target`.
    fn move_before(&mut self, k: NodeKey, target: NodeKey) {
        if k == target || self.nodes[target].prev == k {
            return;
        }
        let p = self.nodes[k].prev;
        let n = self.nodes[k].next;
        self.nodes[p].next = n;
        self.nodes[n].prev = p;
        let tp = self.nodes[target].prev;
        self.nodes[tp].next = k;
        self.nodes[k].prev = tp;
        self.nodes[k].next = target;
        self.nodes[target].prev = k;
    }

    /// Splice out and free the node immediately before `target`.
    fn remove_before(&mut self, target: NodeKey) {
        let dead = self.nodes[target].prev;
        let p = self.nodes[dead].prev;
        self.nodes[p].next = target;
        self.nodes[target].prev = p;
        self.nodes.remove(dead);
    }

    /// Identify `other` with `this` and propagate every merge that follows
    /// from it. `this` stays live throughout; everything identified away
    /// is parked before the tail sentinel, swept as a worklist, folded
    /// into its representative, and finally freed.
    fn merge(&mut self, this: NodeKey, other: NodeKey) {
        if this == other {
            return;
        }
        let tail = self.tail;
        self.nodes[other].rep = this;
        self.move_before(other, tail);

        // sweep the dead segment; two vertices adjacent to the same
        // representative through the same generator must merge as well
        let mut v = self.nodes[tail].prev;
        while v != tail {
            self.rep_of(v);
            for r in 0..RANK {
                let var = match self.nodes[v].adj[r] {
                    Some(n) => self.rep_of(n),
                    None => continue,
                };
                let vrep = self.nodes[v].rep;
                let vrar = match self.nodes[vrep].adj[r] {
                    Some(n) => self.rep_of(n),
                    None => continue,
                };
                if vrar != var {
                    if var != this {
                        self.nodes[var].rep = vrar;
                        self.move_before(var, tail);
                    } else {
                        // never retire `this` itself; retire the other side
                        self.nodes[vrar].rep = var;
                        self.move_before(vrar, tail);
                    }
                }
            }
            v = self.nodes[v].next;
        }

        // collapse representative chains across the dead segment
        let mut v = self.nodes[tail].prev;
        while v != self.nodes[v].rep {
            self.rep_of(v);
            v = self.nodes[v].prev;
        }

        // fold traced masks and adjacency into the representatives
        let mut v = self.nodes[tail].prev;
        while v != self.nodes[v].rep {
            let rep = self.nodes[v].rep;
            self.nodes[rep].traced |= self.nodes[v].traced;
            for r in 0..RANK {
                if let Some(n) = self.nodes[v].adj[r] {
                    let nrep = self.nodes[n].rep;
                    self.nodes[nrep].adj[r] = Some(rep);
                    self.nodes[rep].adj[r] = Some(nrep);
                }
            }
            v = self.nodes[v].prev;
        }

        // free the dead slots
        loop {
            let last = self.nodes[tail].prev;
            if last == self.head || self.nodes[last].rep == last {
                break;
            }
            self.remove_before(tail);
        }
    }

    /// Number surviving vertices in list order and flatten the adjacency
    /// into the left-multiplication table.
    fn into_left_table(self) -> (Vec<[usize; RANK]>, usize) {
        let mut index = SecondaryMap::new();
        let mut order = Vec::with_capacity(self.live_count());
        let mut v = self.nodes[self.head].next;
        while v != self.tail {
            index.insert(v, order.len());
            order.push(v);
            v = self.nodes[v].next;
        }
        let ord = order.len();
        let mut left = vec![[0usize; RANK]; ord];
        for (g, &k) in order.iter().enumerate() {
            for j in 0..RANK {
                let n = self.nodes[k].adj[j].expect("coset enumeration left an open edge");
                left[g][j] = index[n];
            }
        }
        (left, ord)
    }
}
