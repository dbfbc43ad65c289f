//! 支持改键的二叉堆
//!
//! 数组存放 (值, 键)，另有 值 -> 下标 的索引，二者在每次交换后保持一致。
//! 堆序：每个元素的键按比较器不大于两个子元素的键，堆顶是最小元素。
//!
//! 值的键在堆外变化后，调用 [`BinaryHeap::update_decreased`] 或
//! [`BinaryHeap::update_increased`] 从它当前的位置上浮或下沉，不需要扫描整个堆。

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// 默认比较器：键的自然顺序
pub type NaturalOrder<K> = fn(&K, &K) -> Ordering;

/// 支持改键的最小二叉堆
#[derive(Clone)]
pub struct BinaryHeap<T, K, C = NaturalOrder<K>> {
    data: Vec<(T, K)>,
    positions: HashMap<T, usize>,
    compare: C,
}

impl<T: Clone + Eq + Hash, K: Ord> BinaryHeap<T, K> {
    /// 按键的自然顺序创建空堆
    pub fn new() -> Self {
        Self::with_comparator(K::cmp)
    }
}

impl<T: Clone + Eq + Hash, K: Ord> Default for BinaryHeap<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K, C> BinaryHeap<T, K, C>
where
    T: Clone + Eq + Hash,
    C: Fn(&K, &K) -> Ordering,
{
    /// 使用自定义比较器创建空堆
    pub fn with_comparator(compare: C) -> Self {
        Self {
            data: Vec::new(),
            positions: HashMap::new(),
            compare,
        }
    }

    /// 一次性建堆，O(n)；重复的值只保留第一次出现
    pub fn from_entries<I>(entries: I, compare: C) -> Self
    where
        I: IntoIterator<Item = (T, K)>,
    {
        let mut heap = Self::with_comparator(compare);
        for (value, key) in entries {
            if heap.positions.contains_key(&value) {
                continue;
            }
            heap.positions.insert(value.clone(), heap.data.len());
            heap.data.push((value, key));
        }
        for index in (0..heap.data.len() / 2).rev() {
            heap.sink(index);
        }
        heap
    }

    // ==================== 入队出队 ====================

    /// 入队；值已在堆中时不做任何修改并返回 false
    pub fn enqueue(&mut self, value: T, key: K) -> bool {
        if self.positions.contains_key(&value) {
            return false;
        }
        let index = self.data.len();
        self.positions.insert(value.clone(), index);
        self.data.push((value, key));
        self.rise(index);
        true
    }

    /// 取出键最小的元素
    pub fn dequeue(&mut self) -> Option<(T, K)> {
        self.take(0)
    }

    pub fn peek(&self) -> Option<(&T, &K)> {
        self.data.first().map(|(value, key)| (value, key))
    }

    /// 按出队顺序取出所有元素
    pub fn drain_sorted(&mut self) -> impl Iterator<Item = (T, K)> + '_ {
        std::iter::from_fn(move || self.dequeue())
    }

    // ==================== 改键 ====================

    /// 键变小后上浮，返回值是否在堆中
    pub fn update_decreased(&mut self, value: &T, key: K) -> bool {
        let Some(&index) = self.positions.get(value) else {
            return false;
        };
        self.data[index].1 = key;
        self.rise(index);
        true
    }

    /// 键变大后下沉，返回值是否在堆中
    pub fn update_increased(&mut self, value: &T, key: K) -> bool {
        let Some(&index) = self.positions.get(value) else {
            return false;
        };
        self.data[index].1 = key;
        self.sink(index);
        true
    }

    /// 方向未知的改键
    pub fn update(&mut self, value: &T, key: K) -> bool {
        let Some(&index) = self.positions.get(value) else {
            return false;
        };
        self.data[index].1 = key;
        let index = self.rise(index);
        self.sink(index);
        true
    }

    /// 从堆中删除任意值，返回它的键
    pub fn remove(&mut self, value: &T) -> Option<K> {
        let index = *self.positions.get(value)?;
        self.take(index).map(|(_, key)| key)
    }

    // ==================== 查询 ====================

    pub fn contains(&self, value: &T) -> bool {
        self.positions.contains_key(value)
    }

    pub fn key(&self, value: &T) -> Option<&K> {
        self.positions.get(value).map(|&index| &self.data[index].1)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.positions.clear();
    }

    /// 按数组顺序（非出队顺序）遍历
    pub fn iter(&self) -> impl Iterator<Item = (&T, &K)> {
        self.data.iter().map(|(value, key)| (value, key))
    }

    // ==================== 内部 ====================

    fn take(&mut self, index: usize) -> Option<(T, K)> {
        if index >= self.data.len() {
            return None;
        }
        let last = self.data.len() - 1;
        self.swap(index, last);
        let (value, key) = self.data.pop()?;
        self.positions.remove(&value);
        if index < self.data.len() {
            let index = self.rise(index);
            self.sink(index);
        }
        Some((value, key))
    }

    fn less(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.data[a].1, &self.data[b].1) == Ordering::Less
    }

    /// 上浮，返回最终位置
    fn rise(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.less(index, parent) {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
        index
    }

    fn sink(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;
            if left < self.data.len() && self.less(left, smallest) {
                smallest = left;
            }
            if right < self.data.len() && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == index {
                return;
            }
            self.swap(index, smallest);
            index = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.data.swap(a, b);
        for index in [a, b] {
            if let Some(position) = self.positions.get_mut(&self.data[index].0) {
                *position = index;
            }
        }
    }
}

impl<T: fmt::Debug, K: fmt::Debug, C> fmt::Debug for BinaryHeap<T, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use priority_queue::PriorityQueue;
    use proptest::prelude::*;
    use std::cmp::Reverse;

    impl<T, K, C> BinaryHeap<T, K, C>
    where
        T: Clone + Eq + Hash + fmt::Debug,
        C: Fn(&K, &K) -> Ordering,
    {
        /// 检查堆序与索引一致性
        fn verify(&self) {
            assert_eq!(self.data.len(), self.positions.len());
            for (index, (value, _)) in self.data.iter().enumerate() {
                assert_eq!(self.positions.get(value), Some(&index), "索引不一致: {:?}", value);
                if index > 0 {
                    assert!(!self.less(index, (index - 1) / 2), "堆序被破坏: {}", index);
                }
            }
        }
    }

    #[test]
    fn test_enqueue_dequeue_order() {
        let mut heap = BinaryHeap::new();
        for (value, key) in [("d", 4), ("a", 1), ("c", 3), ("e", 5), ("b", 2)] {
            assert!(heap.enqueue(value, key));
        }
        heap.verify();
        assert_eq!(heap.peek(), Some((&"a", &1)));
        let order: Vec<_> = heap.drain_sorted().map(|(value, _)| value).collect();
        assert_eq!(order, vec!["a", "b", "c", "d", "e"]);
        assert!(heap.is_empty());
        assert_eq!(heap.dequeue(), None);
    }

    #[test]
    fn test_duplicate_enqueue_is_rejected() {
        let mut heap = BinaryHeap::new();
        heap.enqueue('x', 5);
        heap.enqueue('y', 1);
        assert!(!heap.enqueue('x', 0));
        assert_eq!(heap.key(&'x'), Some(&5));
        assert_eq!(heap.len(), 2);
        heap.verify();
    }

    #[test]
    fn test_decrease_and_increase_key() {
        let mut heap = BinaryHeap::new();
        for i in 0..10u32 {
            heap.enqueue(i, i * 10);
        }
        assert!(heap.update_decreased(&9, 0));
        heap.verify();
        assert_eq!(heap.peek(), Some((&0, &0)));
        assert!(heap.update_increased(&0, 1000));
        heap.verify();
        assert_eq!(heap.dequeue(), Some((9, 0)));
        assert!(!heap.update_decreased(&42, 1));
        assert!(heap.update(&5, 1));
        assert_eq!(heap.dequeue(), Some((5, 1)));
        heap.verify();
    }

    #[test]
    fn test_remove_arbitrary() {
        let mut heap = BinaryHeap::new();
        for i in 0..20 {
            heap.enqueue(i, (i * 7) % 20);
        }
        assert_eq!(heap.remove(&13), Some((13 * 7) % 20));
        assert_eq!(heap.remove(&13), None);
        assert!(!heap.contains(&13));
        heap.verify();
        assert_eq!(heap.len(), 19);
    }

    #[test]
    fn test_custom_comparator_and_heapify() {
        let heap = BinaryHeap::from_entries(
            [("a", 1.5), ("b", -2.0), ("c", f64::INFINITY), ("a", -9.0)],
            f64::total_cmp,
        );
        heap.verify();
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek(), Some((&"b", &-2.0)));
        assert_eq!(heap.key(&"a"), Some(&1.5));
    }

    #[derive(Debug, Clone)]
    enum Operation {
        Enqueue(u8, u16),
        Dequeue,
        Update(u8, u16),
        Remove(u8),
    }

    fn operation() -> impl Strategy<Value = Operation> {
        prop_oneof![
            (0..32u8, any::<u16>()).prop_map(|(v, k)| Operation::Enqueue(v, k)),
            Just(Operation::Dequeue),
            (0..32u8, any::<u16>()).prop_map(|(v, k)| Operation::Update(v, k)),
            (0..32u8).prop_map(Operation::Remove),
        ]
    }

    proptest! {
        #[test]
        fn test_heap_matches_priority_queue(ops in proptest::collection::vec(operation(), 1..200)) {
            let mut heap = BinaryHeap::new();
            let mut oracle = PriorityQueue::new();

            for op in ops {
                match op {
                    Operation::Enqueue(v, k) => {
                        let added = heap.enqueue(v, k);
                        prop_assert_eq!(added, oracle.get(&v).is_none());
                        if added {
                            oracle.push(v, Reverse(k));
                        }
                    }
                    Operation::Dequeue => {
                        // 键相同的值出队顺序不确定，只比较键，再从对照队列删除同一个值
                        let minimum = oracle.peek().map(|(_, Reverse(k))| *k);
                        match heap.dequeue() {
                            Some((v, k)) => {
                                prop_assert_eq!(Some(k), minimum);
                                prop_assert_eq!(oracle.remove(&v).map(|(_, Reverse(k))| k), Some(k));
                            }
                            None => {
                                prop_assert!(oracle.is_empty());
                            }
                        }
                    }
                    Operation::Update(v, k) => {
                        let old = heap.key(&v).copied();
                        let present = match old {
                            Some(old) if k < old => heap.update_decreased(&v, k),
                            Some(_) => heap.update_increased(&v, k),
                            None => heap.update(&v, k),
                        };
                        prop_assert_eq!(present, oracle.change_priority(&v, Reverse(k)).is_some());
                    }
                    Operation::Remove(v) => {
                        let ours = heap.remove(&v);
                        let theirs = oracle.remove(&v).map(|(_, Reverse(k))| k);
                        prop_assert_eq!(ours, theirs);
                    }
                }
                heap.verify();
                prop_assert_eq!(heap.len(), oracle.len());
            }
        }
    }
}
