#[macro_export]
macro_rules! define_rule {
    (
        $(#[$meta:meta])*
        $struct_name:ident,
        $name_str:expr,
        $priority:expr,
        matches = |$mseq:ident| $mbody:expr,
        transform = |$tseq:ident| $tbody:expr $(,)?
    ) => {
        $(#[$meta])*
        pub struct $struct_name;

        impl $crate::rule::Rule for $struct_name {
            fn name(&self) -> &'static str {
                $name_str
            }

            fn priority(&self) -> i32 {
                $priority
            }

            fn matches(&self, $mseq: &eqv_ast::NodeSeq) -> bool {
                $mbody
            }

            fn transform(&self, $tseq: &eqv_ast::NodeSeq) -> eqv_ast::NodeSeq {
                $tbody
            }
        }
    };
}
