/// Create a [FastVec](crate::FastVec) containing the arguments, as with [std::vec!].
#[macro_export]
macro_rules! fastvec {
    [] => {
        $crate::FastVec::new()
    };
    [$elem:expr; $n:expr] => {
        $crate::FastVec::from_elem($elem, $n)
    };
    [$($x:expr),+ $(,)?] => {
        $crate::FastVec::from([$($x),+].as_slice())
    };
}
