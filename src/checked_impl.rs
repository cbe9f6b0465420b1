// Forwards a num_traits checked operation to the inherent method of the
// same name.
macro_rules! checked_impl {
  ($trait_name:ident, $method:ident, $t:ty) => {
    use num_traits::$trait_name;

    impl $trait_name for $t {
      #[inline]
      fn $method(&self, v: &$t) -> Option<$t> {
        <$t>::$method(self, v)
      }
    }
  };
}
