use leptos::prelude::*;

pub fn icon(name: &str) -> AnyView {
    match name {
        "caret-right" => view! {
            <svg width="12" height="12" viewBox="0 0 24 24" fill="currentColor" aria-hidden="true">
                <path d="M8 4l10 8-10 8z"/>
            </svg>
        }.into_any(),
        "caret-down" => view! {
            <svg width="12" height="12" viewBox="0 0 24 24" fill="currentColor" aria-hidden="true">
                <path d="M4 8h16l-8 10z"/>
            </svg>
        }.into_any(),
        "bridge-pay" => view! {
            <svg width="16px" height="16px" viewBox="0 0 8000 8000" preserveAspectRatio="xMidYMid meet" aria-hidden="true">
                <g fill="#3170B7" stroke="none">
                    <path d="M3900 7500 c-8 -5 -24 -10 -34 -10 -39 0 -167 -72 -225 -126 -98 -90 -155 -202 -169 -329 l-7 -59 -60 -12 c-33 -7 -114 -29 -180 -49 -508 -154 -905 -451 -1083 -810 -27 -56 -51 -120 -82 -220 -13 -46 -9 -156 9 -225 38 -141 156 -287 281 -348 66 -33 178 -62 238 -62 64 0 188 32 254 67 83 43 184 146 227 230 17 35 31 68 31 76 0 14 66 80 120 119 79 58 229 125 360 162 226 63 532 69 704 16 33 -11 66 -20 72 -20 7 0 14 30 19 78 27 301 162 626 353 850 31 37 41 56 33 61 -6 4 -59 23 -116 41 l-104 34 -6 56 c-32 279 -263 490 -536 490 -46 0 -91 -5 -99 -10z"/>
                    <path d="M5785 7014 c-11 -2 -45 -9 -75 -15 -153 -29 -346 -115 -473 -210 -152 -114 -302 -300 -381 -470 -67 -145 -106 -327 -106 -496 0 -574 413 -1070 981 -1178 101 -19 326 -19 431 0 466 82 860 464 957 925 6 30 16 78 22 105 16 73 6 284 -19 393 -54 241 -158 430 -332 604 -180 179 -393 291 -639 333 -76 14 -314 19 -366 9z m234 -686 c71 -145 160 -328 200 -407 39 -78 71 -154 71 -167 l0 -24 -190 0 -190 0 5 -37 c3 -21 16 -132 30 -248 14 -115 30 -249 36 -297 7 -48 9 -94 6 -102 -16 -41 -39 -9 -130 177 -52 105 -143 290 -202 410 -59 120 -104 224 -101 232 4 12 37 15 190 15 l186 0 -5 28 c-3 15 -21 168 -40 341 -34 311 -34 341 -3 341 5 0 67 -118 137 -262z"/>
                    <path d="M4605 4835 c-155 -114 -407 -210 -780 -299 -488 -117 -943 -333 -1230 -583 -268 -234 -453 -549 -510 -868 -8 -49 -20 -109 -25 -133 -13 -54 -13 -273 -1 -321 5 -20 17 -81 27 -136 62 -367 276 -730 586 -993 187 -158 453 -306 681 -377 l117 -37 0 -72 c0 -132 55 -260 155 -361 65 -66 122 -102 206 -130 30 -10 64 -21 77 -26 73 -28 256 6 359 67 156 91 261 264 266 438 2 62 4 67 27 72 218 50 334 90 505 174 339 165 586 385 779 694 94 149 124 293 92 430 -50 211 -198 361 -403 411 -174 42 -371 -14 -497 -141 -21 -21 -66 -82 -101 -134 -138 -210 -305 -317 -605 -386 -39 -9 -142 -18 -256 -21 -155 -4 -206 -2 -273 11 -315 64 -554 249 -643 499 -18 50 -23 84 -23 173 0 109 1 112 39 187 113 223 424 402 896 517 670 162 1081 358 1402 669 60 57 108 109 108 115 0 6 -30 20 -67 31 -98 27 -222 77 -311 125 -168 90 -361 247 -462 378 -30 39 -59 71 -65 71 -5 -1 -37 -20 -70 -44z"/>
                </g>
            </svg>
        }.into_any(),
        "suspended" => view! {
            <svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="#C62828" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">
                <circle cx="12" cy="12" r="10"/>
                <path d="M10 15V9"/>
                <path d="M14 15V9"/>
            </svg>
        }.into_any(),
        _ => view! {
            <svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">
                <circle cx="12" cy="12" r="10"/>
            </svg>
        }.into_any(),
    }
}
