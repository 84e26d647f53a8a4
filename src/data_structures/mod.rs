pub mod rank_heap;
